mod common;

use common::*;
use guildkit::prelude::*;
use serde_json::json;

#[tokio::test]
async fn edit_with_nothing_set_makes_no_request() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let mut general = text_channel(&guild, GENERAL);

    general.edit(EditTextChannel::new()).await.unwrap();
    voice_channel(&guild, LOUNGE).edit(EditVoiceChannel::new()).await.unwrap();
    category_channel(&guild, CATEGORY).edit(EditCategoryChannel::new()).await.unwrap();

    assert!(rest.calls().is_empty());
    assert_eq!(general.base.name, "general");
}

#[tokio::test]
async fn edit_sends_only_the_given_fields() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let mut general = text_channel(&guild, GENERAL);

    general
        .edit(EditTextChannel::new().nsfw(false).reason("cleanup"))
        .await
        .unwrap();

    assert_eq!(
        rest.calls(),
        vec![Call::EditChannel {
            channel_id: Snowflake(GENERAL),
            body: json!({ "nsfw": false }),
            reason: Some("cleanup".to_string()),
        }]
    );
}

#[tokio::test]
async fn edit_rehydrates_from_the_response() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let mut general = text_channel(&guild, GENERAL);
    rest.respond_to_channel_edit(json!({
        "id": GENERAL.to_string(),
        "type": 0,
        "name": "renamed",
        "position": 7,
        "parent_id": CATEGORY.to_string(),
        "rate_limit_per_user": 30,
    }));

    general.edit(EditTextChannel::new().name("renamed")).await.unwrap();

    assert_eq!(general.name(), "renamed");
    assert_eq!(general.base.position, 7);
    assert_eq!(general.slowmode_delay, 30);
    // Fields missing from the response fall back to their defaults.
    assert_eq!(general.topic, None);
    assert!(!general.nsfw);
    assert_eq!(general.default_auto_archive_duration, 60);
}

#[tokio::test]
async fn empty_response_leaves_channel_alone() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let mut general = text_channel(&guild, GENERAL);

    general.edit(EditTextChannel::new().name("renamed")).await.unwrap();
    assert_eq!(general.base.name, "general");

    rest.respond_to_channel_edit(json!({}));
    general.edit(EditTextChannel::new().name("renamed")).await.unwrap();
    assert_eq!(general.base.name, "general");
    assert_eq!(general.topic.as_deref(), Some("hello"));
    assert_eq!(rest.calls().len(), 2);
}

#[tokio::test]
async fn bitrate_is_checked_before_sending() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let mut lounge = voice_channel(&guild, LOUNGE);

    for bad in [7_999, 128_001] {
        let err = lounge.edit(EditVoiceChannel::new().bitrate(bad)).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::BitrateOutOfRange(Some(b))) if b == bad
        ));
    }
    assert!(rest.calls().is_empty());

    lounge.edit(EditVoiceChannel::new().bitrate(8_000)).await.unwrap();
    lounge.edit(EditVoiceChannel::new().bitrate(128_000)).await.unwrap();
    assert_eq!(rest.calls().len(), 2);
    assert_eq!(lounge.bitrate, Some(64_000));
}

#[tokio::test]
async fn archive_duration_is_checked_before_sending() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let mut general = text_channel(&guild, GENERAL);

    let err = general
        .edit(EditTextChannel::new().default_auto_archive_duration(120))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::InvalidAutoArchiveDuration(Some(120)))
    ));
    assert!(rest.calls().is_empty());

    general
        .edit(EditTextChannel::new().default_auto_archive_duration(1440))
        .await
        .unwrap();
    assert_eq!(
        rest.calls(),
        vec![Call::EditChannel {
            channel_id: Snowflake(GENERAL),
            body: json!({ "default_auto_archive_duration": 1440 }),
            reason: None,
        }]
    );
}

#[tokio::test]
async fn text_edit_refuses_non_text_types() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let mut general = text_channel(&guild, GENERAL);

    let err = general
        .edit(EditTextChannel::new().kind(ChannelType::Category))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::UnsupportedChannelType(Some(4)))
    ));
    assert!(rest.calls().is_empty());
}

#[tokio::test]
async fn parent_is_sent_as_id_or_null() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let category = category_channel(&guild, CATEGORY);
    let mut announcements = text_channel(&guild, ANNOUNCEMENTS);
    let mut lounge = voice_channel(&guild, LOUNGE);

    announcements
        .edit(EditTextChannel::new().parent(Some(&category)))
        .await
        .unwrap();
    lounge.edit(EditVoiceChannel::new().parent(None)).await.unwrap();

    let bodies: Vec<_> = rest
        .calls()
        .into_iter()
        .map(|call| match call {
            Call::EditChannel { body, .. } => body,
            other => panic!("unexpected call {:?}", other),
        })
        .collect();
    assert_eq!(
        bodies,
        vec![
            json!({ "parent_id": CATEGORY.to_string() }),
            json!({ "parent_id": null }),
        ]
    );
}

#[tokio::test]
async fn delete_makes_one_call_and_changes_nothing_locally() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let general = text_channel(&guild, GENERAL);

    general.delete(Some("spam")).await.unwrap();

    assert_eq!(
        rest.calls(),
        vec![Call::DeleteChannel {
            channel_id: Snowflake(GENERAL),
            reason: Some("spam".to_string()),
        }]
    );
    assert!(guild.cache().get_channel(Snowflake(GENERAL)).is_some());
    assert_eq!(general.base.name, "general");
}

#[tokio::test]
async fn api_errors_come_back_unchanged() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let mut general = text_channel(&guild, GENERAL);
    rest.deny("manage_channels");

    let err = general.edit(EditTextChannel::new().name("x")).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(ref m) if m == "manage_channels"));
    assert_eq!(general.base.name, "general");

    let err = general.delete(None).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
}

#[test]
fn unknown_kinds_keep_the_shared_fields() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);

    match guild.cache().get_channel(Snowflake(FORUM)) {
        Some(GuildChannel::Other(base)) => {
            assert_eq!(base.kind, 15);
            assert_eq!(base.name, "help");
            assert_eq!(base.channel_type(), None);
        }
        other => panic!("expected an unmodelled channel, got {:?}", other),
    }
}

#[test]
fn factory_picks_the_kind_from_the_type_code() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);

    let kinds: Vec<_> = guild
        .cache()
        .channels()
        .into_iter()
        .map(|c| match c {
            GuildChannel::Text(_) => "text",
            GuildChannel::News(_) => "news",
            GuildChannel::Category(_) => "category",
            GuildChannel::Voice(_) => "voice",
            GuildChannel::Stage(_) => "stage",
            GuildChannel::Other(_) => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["category", "text", "voice", "news", "other"]);
    assert!(text_channel(&guild, ANNOUNCEMENTS).is_news());
}

#[test]
fn category_lists_its_channels_live() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let category = category_channel(&guild, CATEGORY);

    let ids: Vec<_> = category.channels().iter().map(GuildChannel::id).collect();
    assert_eq!(ids, vec![Snowflake(GENERAL), Snowflake(LOUNGE)]);

    let added = guild
        .channel_from_payload(json!({
            "id": "205",
            "type": 13,
            "name": "Stage",
            "position": 9,
            "parent_id": CATEGORY.to_string(),
        }))
        .unwrap();
    guild.cache().add_channel(added);
    assert_eq!(category.channels().len(), 3);

    guild.cache().delete_channel(Snowflake(GENERAL));
    let ids: Vec<_> = category.channels().iter().map(GuildChannel::id).collect();
    assert_eq!(ids, vec![Snowflake(LOUNGE), Snowflake(205)]);
}

#[test]
fn category_is_empty_once_the_guild_is_gone() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let category = category_channel(&guild, CATEGORY);
    drop(guild);

    assert!(category.channels().is_empty());
}

#[test]
fn changing_the_type_code_rebuilds_the_channel() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let mut channel = guild.cache().get_channel(Snowflake(GENERAL)).unwrap();

    channel
        .update_with_data(json!({ "id": GENERAL.to_string(), "type": 5, "name": "general" }))
        .unwrap();
    assert!(matches!(channel, GuildChannel::News(_)));

    channel
        .update_with_data(json!({ "id": GENERAL.to_string(), "type": 5, "name": "news" }))
        .unwrap();
    assert_eq!(channel.name(), "news");

    channel
        .update_with_data(json!({ "id": GENERAL.to_string(), "type": 2, "name": "voice" }))
        .unwrap();
    assert_eq!(channel.as_voice().map(|v| v.user_limit), Some(0));
}

#[test]
fn bad_payload_leaves_the_channel_untouched() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let mut general = text_channel(&guild, GENERAL);

    let err = general.update_with_data(json!({ "id": GENERAL.to_string(), "type": 0 }));
    assert!(matches!(err, Err(ClientError::Json(_))));
    assert_eq!(general.base.name, "general");
    assert_eq!(general.topic.as_deref(), Some("hello"));
}

#[test]
fn mentions() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);

    assert_eq!(text_channel(&guild, GENERAL).mention(), "<#201>");
    assert_eq!(guild.cache().get_channel(Snowflake(FORUM)).unwrap().mention(), "<#204>");
}

#[test]
fn type_codes_past_a_byte_still_hydrate() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);

    let channel = guild
        .channel_from_payload(json!({ "id": "900", "type": 300, "name": "future" }))
        .unwrap();

    match channel {
        GuildChannel::Other(base) => {
            assert_eq!(base.kind, 300);
            assert_eq!(base.name, "future");
        }
        other => panic!("expected an unmodelled channel, got {:?}", other),
    }
}

#[tokio::test]
async fn converting_to_news_switches_the_variant() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let mut channel = guild.cache().get_channel(Snowflake(GENERAL)).unwrap();
    rest.respond_to_channel_edit(json!({
        "id": GENERAL.to_string(),
        "type": 5,
        "name": "general",
        "parent_id": CATEGORY.to_string(),
    }));

    channel
        .edit_text(EditTextChannel::new().kind(ChannelType::News))
        .await
        .unwrap();

    assert!(matches!(channel, GuildChannel::News(_)));
    assert_eq!(channel.kind(), 5);
    assert_eq!(
        rest.calls(),
        vec![Call::EditChannel {
            channel_id: Snowflake(GENERAL),
            body: json!({ "type": 5 }),
            reason: None,
        }]
    );
}

#[tokio::test]
async fn enum_edits_check_the_kind_first() {
    let rest = MockRest::new();
    let guild = build_guild(&rest);
    let mut general = guild.cache().get_channel(Snowflake(GENERAL)).unwrap();
    let mut lounge = guild.cache().get_channel(Snowflake(LOUNGE)).unwrap();

    let err = general
        .edit_voice(EditVoiceChannel::new().bitrate(8_000))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::ChannelKindMismatch(0))
    ));
    let err = lounge
        .edit_category(EditCategoryChannel::new().name("x"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::ChannelKindMismatch(2))
    ));
    assert!(rest.calls().is_empty());

    rest.respond_to_channel_edit(json!({
        "id": LOUNGE.to_string(),
        "type": 2,
        "name": "Lounge",
        "bitrate": 96000,
    }));
    lounge.edit_voice(EditVoiceChannel::new().bitrate(96_000)).await.unwrap();
    assert_eq!(lounge.as_voice().and_then(|v| v.bitrate), Some(96_000));
}
