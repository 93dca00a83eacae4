use vocalis::application::ports::TermRuleSource;
use vocalis::domain::UserId;
use vocalis::infrastructure::terms::{CsvRuleSource, parse_ruleset};

#[test]
fn given_two_column_rows_when_parsed_then_rules_are_loaded_in_order() {
    let ruleset = parse_ruleset("人工智慧,人工智能\nOpenAi,OpenAI\n");
    assert_eq!(ruleset.len(), 2);
    assert_eq!(ruleset.rules()[0].pattern(), "人工智慧");
    assert_eq!(ruleset.rules()[1].replacement(), "OpenAI");
}

#[test]
fn given_rows_with_one_column_when_parsed_then_they_are_discarded_silently() {
    let ruleset = parse_ruleset("just-one-column\nvalid,row\n\n");
    assert_eq!(ruleset.len(), 1);
    assert_eq!(ruleset.rules()[0].pattern(), "valid");
}

#[test]
fn given_rows_with_extra_columns_when_parsed_then_only_first_two_are_used() {
    let ruleset = parse_ruleset("a,b,c,d\n");
    assert_eq!(ruleset.len(), 1);
    assert_eq!(ruleset.rules()[0].pattern(), "a");
    assert_eq!(ruleset.rules()[0].replacement(), "b");
}

#[test]
fn given_row_with_empty_pattern_when_parsed_then_it_is_skipped() {
    let ruleset = parse_ruleset(",replacement\nreal,rule\n");
    assert_eq!(ruleset.len(), 1);
    assert_eq!(ruleset.rules()[0].pattern(), "real");
}

#[test]
fn given_crlf_line_endings_when_parsed_then_replacement_has_no_trailing_cr() {
    let ruleset = parse_ruleset("3pm,15:00\r\nfoo,bar\r\n");
    assert_eq!(ruleset.rules()[0].replacement(), "15:00");
    assert_eq!(ruleset.rules()[1].replacement(), "bar");
}

#[tokio::test]
async fn given_missing_user_file_when_loading_then_ruleset_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let source = CsvRuleSource::new(dir.path());

    let ruleset = source.load(&UserId::new("nobody")).await;
    assert!(ruleset.is_empty());
}

#[tokio::test]
async fn given_missing_user_file_when_reading_raw_then_content_is_empty_string() {
    let dir = tempfile::tempdir().unwrap();
    let source = CsvRuleSource::new(dir.path());

    let content = source.read_raw(&UserId::new("nobody")).await.unwrap();
    assert_eq!(content, "");
}

#[tokio::test]
async fn given_saved_content_when_reading_back_then_it_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let source = CsvRuleSource::new(dir.path().join("nested"));
    let user = UserId::new("alice");

    source.write_raw(&user, "3pm,15:00\n").await.unwrap();

    let content = source.read_raw(&user).await.unwrap();
    assert_eq!(content, "3pm,15:00\n");

    let ruleset = source.load(&user).await;
    assert_eq!(ruleset.apply("meeting at 3pm"), "meeting at 15:00");
}

#[tokio::test]
async fn given_edited_rules_when_loading_again_then_changes_take_effect_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let source = CsvRuleSource::new(dir.path());
    let user = UserId::new("bob");

    source.write_raw(&user, "a,b\n").await.unwrap();
    assert_eq!(source.load(&user).await.apply("a"), "b");

    source.write_raw(&user, "a,z\n").await.unwrap();
    assert_eq!(source.load(&user).await.apply("a"), "z");
}

#[tokio::test]
async fn given_different_users_when_loading_then_rulesets_are_scoped_per_user() {
    let dir = tempfile::tempdir().unwrap();
    let source = CsvRuleSource::new(dir.path());

    source.write_raw(&UserId::new("alice"), "x,y\n").await.unwrap();

    assert!(!source.load(&UserId::new("alice")).await.is_empty());
    assert!(source.load(&UserId::new("bob")).await.is_empty());
}
