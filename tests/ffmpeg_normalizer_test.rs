#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use vocalis::application::ports::{AudioNormalizer, PreprocessingError};
use vocalis::domain::AudioBlob;
use vocalis::infrastructure::audio::FfmpegNormalizer;

const FIXTURE_SAMPLES: usize = 1600;

fn write_fixture_wav(path: &Path, sample_rate: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..FIXTURE_SAMPLES {
        writer.write_sample(((i % 100) as i32 * 300 - 15000) as i16).unwrap();
    }
    writer.finalize().unwrap();
}

/// Writes an executable stand-in for ffmpeg.
fn write_fake_tool(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("fake-ffmpeg");
    std::fs::write(&path, contents).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

/// A tool that "transcodes" by copying a prepared WAV to its last
/// argument, the way ffmpeg writes its output file.
fn copying_tool(dir: &Path, wav: &Path) -> PathBuf {
    let script = format!(
        "#!/bin/sh\nfor a in \"$@\"; do out=\"$a\"; done\ncp \"{}\" \"$out\"\n",
        wav.display()
    );
    write_fake_tool(dir, &script)
}

fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

fn webm_blob() -> AudioBlob {
    AudioBlob::new(vec![0x1a, 0x45, 0xdf, 0xa3, 0, 1, 2, 3], "audio/webm")
}

#[tokio::test]
async fn given_successful_tool_when_normalizing_then_samples_are_parsed_and_temp_files_released() {
    let fixtures = tempfile::tempdir().unwrap();
    let artifacts = tempfile::tempdir().unwrap();

    let wav = fixtures.path().join("normalized.wav");
    write_fixture_wav(&wav, 16_000);
    let tool = copying_tool(fixtures.path(), &wav);

    let normalizer =
        FfmpegNormalizer::with_temp_dir(tool.to_str().unwrap(), artifacts.path());

    let audio = normalizer.normalize(&webm_blob()).await.unwrap();
    assert_eq!(audio.samples().len(), FIXTURE_SAMPLES);
    assert!(audio.samples().iter().all(|s| (-1.0..=1.0).contains(s)));

    assert_eq!(count_entries(artifacts.path()), 0);
}

#[tokio::test]
async fn given_tool_exiting_nonzero_when_normalizing_then_error_carries_diagnostics() {
    let fixtures = tempfile::tempdir().unwrap();
    let artifacts = tempfile::tempdir().unwrap();

    let tool = write_fake_tool(
        fixtures.path(),
        "#!/bin/sh\necho 'unsupported codec in input' >&2\nexit 1\n",
    );

    let normalizer =
        FfmpegNormalizer::with_temp_dir(tool.to_str().unwrap(), artifacts.path());

    let err = normalizer.normalize(&webm_blob()).await.unwrap_err();
    match err {
        PreprocessingError::ToolFailed(message) => {
            assert!(message.contains("unsupported codec in input"));
        }
        other => panic!("expected ToolFailed, got {:?}", other),
    }

    // Temp artifacts must be released on the failure path too.
    assert_eq!(count_entries(artifacts.path()), 0);
}

#[tokio::test]
async fn given_missing_tool_when_normalizing_then_error_is_tool_unavailable() {
    let artifacts = tempfile::tempdir().unwrap();
    let normalizer = FfmpegNormalizer::with_temp_dir(
        "/nonexistent/path/to/ffmpeg",
        artifacts.path(),
    );

    let err = normalizer.normalize(&webm_blob()).await.unwrap_err();
    assert!(matches!(err, PreprocessingError::ToolUnavailable(_)));
    assert_eq!(count_entries(artifacts.path()), 0);
}

#[tokio::test]
async fn given_tool_emitting_wrong_format_when_normalizing_then_output_is_rejected() {
    let fixtures = tempfile::tempdir().unwrap();
    let artifacts = tempfile::tempdir().unwrap();

    // 8 kHz output violates the fixed 16 kHz target.
    let wav = fixtures.path().join("wrong-rate.wav");
    write_fixture_wav(&wav, 8_000);
    let tool = copying_tool(fixtures.path(), &wav);

    let normalizer =
        FfmpegNormalizer::with_temp_dir(tool.to_str().unwrap(), artifacts.path());

    let err = normalizer.normalize(&webm_blob()).await.unwrap_err();
    assert!(matches!(err, PreprocessingError::InvalidOutput(_)));
    assert_eq!(count_entries(artifacts.path()), 0);
}
