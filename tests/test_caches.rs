mod common;

use chrono::Duration;
use common::{guild, member, role, sticker, FakeDiscord, TestEnv};
use sticker_showcase::cache::bot_admin_cache::roles_grant_admin;

fn showcase_discord() -> FakeDiscord {
    let discord = FakeDiscord::new();
    {
        let mut state = discord.state();
        state.bot_guilds = Some(vec![guild("g1", "Cats", false), guild("g2", "Dogs", false)]);
        state
            .stickers
            .insert("g1".into(), vec![sticker("s1", "meow"), sticker("s2", "purr")]);
        state.stickers.insert("g2".into(), vec![sticker("s3", "woof")]);
        state.vanity.insert("g1".into(), "cats".into());
    }
    discord
}

#[actix_web::test]
async fn listing_is_rebuilt_once_per_window() {
    let env = TestEnv::new(showcase_discord()).await;

    let first = env.state.stickers.get().await.unwrap();
    let second = env.state.stickers.get().await.unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    assert_eq!(env.discord.calls("bot_guilds"), 1);

    env.clock.advance(Duration::minutes(4));
    env.state.stickers.get().await.unwrap();
    assert_eq!(env.discord.calls("bot_guilds"), 1);

    env.clock.advance(Duration::minutes(1));
    env.state.stickers.get().await.unwrap();
    assert_eq!(env.discord.calls("bot_guilds"), 2);
}

#[actix_web::test]
async fn invalidate_forces_a_rebuild() {
    let env = TestEnv::new(showcase_discord()).await;

    env.state.stickers.get().await.unwrap();
    env.state.stickers.invalidate();
    env.state.stickers.get().await.unwrap();

    assert_eq!(env.discord.calls("bot_guilds"), 2);
}

#[actix_web::test]
async fn rebuild_overtaken_by_invalidate_is_not_kept() {
    let discord = showcase_discord();
    let gate = discord.gate_bot_guilds();
    let env = TestEnv::new(discord).await;
    let cache = &env.state.stickers;

    let (listing, _) = futures::join!(cache.get(), async {
        gate.entered.notified().await;
        cache.invalidate();
        gate.release.notify_one();
    });

    // the caller still gets its listing, it just isn't cached
    assert_eq!(listing.unwrap().len(), 3);
    assert_eq!(env.discord.calls("bot_guilds"), 1);

    cache.get().await.unwrap();
    assert_eq!(env.discord.calls("bot_guilds"), 2);

    cache.get().await.unwrap();
    assert_eq!(env.discord.calls("bot_guilds"), 2);
}

#[actix_web::test]
async fn entries_carry_guild_and_invite() {
    let env = TestEnv::new(showcase_discord()).await;

    let stickers = env.state.stickers.get().await.unwrap();

    let meow = stickers.iter().find(|s| s.id == "s1").unwrap();
    assert_eq!(meow.guild_id, "g1");
    assert_eq!(meow.guild_name, "Cats");
    assert_eq!(meow.guild_icon.as_deref(), Some("icon-g1"));
    assert_eq!(meow.invite_code, "cats");

    // g2 has no vanity url and no readable invites
    let woof = stickers.iter().find(|s| s.id == "s3").unwrap();
    assert_eq!(woof.invite_code, "g2");
}

#[actix_web::test]
async fn unreadable_guild_contributes_nothing() {
    let discord = showcase_discord();
    discord.state().stickers.remove("g2");
    let env = TestEnv::new(discord).await;

    let stickers = env.state.stickers.get().await.unwrap();

    assert_eq!(stickers.len(), 2);
    assert!(stickers.iter().all(|s| s.guild_id == "g1"));
}

#[actix_web::test]
async fn failed_guild_listing_fails_and_caches_nothing() {
    let discord = showcase_discord();
    discord.state().bot_guilds = None;
    let env = TestEnv::new(discord).await;

    assert!(env.state.stickers.get().await.is_err());

    env.discord.state().bot_guilds = Some(vec![guild("g1", "Cats", false)]);
    let stickers = env.state.stickers.get().await.unwrap();
    assert_eq!(stickers.len(), 2);
}

#[actix_web::test]
async fn no_bot_token_means_empty_listing() {
    let env = TestEnv::new(FakeDiscord::without_bot_token()).await;

    let stickers = env.state.stickers.get().await.unwrap();

    assert!(stickers.is_empty());
    assert_eq!(env.discord.calls("bot_guilds"), 0);
}

fn admin_check_discord(bot_roles: &[&str], roles: Vec<sticker_showcase::discord::models::Role>) -> FakeDiscord {
    let discord = FakeDiscord::new();
    {
        let mut state = discord.state();
        state.members.insert("g1".into(), member(bot_roles));
        state.roles.insert("g1".into(), roles);
    }
    discord
}

#[actix_web::test]
async fn bot_admin_when_a_held_role_has_bit_3() {
    let discord = admin_check_discord(
        &["mods"],
        vec![role("everyone", "0"), role("mods", "2147483656")],
    );
    let env = TestEnv::new(discord).await;

    assert!(env.state.bot_admin.is_admin("g1").await);
}

#[actix_web::test]
async fn roles_the_bot_lacks_do_not_count() {
    let discord = admin_check_discord(
        &["helpers"],
        vec![role("helpers", "32"), role("owners", "8")],
    );
    let env = TestEnv::new(discord).await;

    assert!(!env.state.bot_admin.is_admin("g1").await);
}

#[actix_web::test]
async fn admin_answers_are_cached_for_two_minutes() {
    let discord = admin_check_discord(&["mods"], vec![role("mods", "8")]);
    let env = TestEnv::new(discord).await;

    assert!(env.state.bot_admin.is_admin("g1").await);
    assert!(env.state.bot_admin.is_admin("g1").await);
    assert_eq!(env.discord.calls("guild_member"), 1);

    // a revoked role isn't noticed until the entry expires
    env.discord.state().roles.insert("g1".into(), vec![role("mods", "0")]);
    env.clock.advance(Duration::seconds(119));
    assert!(env.state.bot_admin.is_admin("g1").await);

    env.clock.advance(Duration::seconds(1));
    assert!(!env.state.bot_admin.is_admin("g1").await);
    assert_eq!(env.discord.calls("guild_member"), 2);
}

#[actix_web::test]
async fn failed_checks_are_not_cached() {
    let discord = FakeDiscord::new();
    discord.state().roles.insert("g1".into(), vec![role("mods", "8")]);
    let env = TestEnv::new(discord).await;

    assert!(!env.state.bot_admin.is_admin("g1").await);
    assert!(!env.state.bot_admin.is_admin("g1").await);
    assert_eq!(env.discord.calls("guild_member"), 2);

    env.discord.state().members.insert("g1".into(), member(&["mods"]));
    assert!(env.state.bot_admin.is_admin("g1").await);
}

#[test]
fn malformed_role_permissions_only_disqualify_that_role() {
    let held = vec!["broken".to_owned(), "admin".to_owned()];

    assert!(roles_grant_admin(
        &held,
        &[role("broken", "not a number"), role("admin", "8")]
    ));
    assert!(!roles_grant_admin(&held, &[role("broken", "not a number")]));
    // bit 3 set alongside bits above 2^53
    assert!(roles_grant_admin(&held, &[role("admin", "9007199254741000")]));
}
