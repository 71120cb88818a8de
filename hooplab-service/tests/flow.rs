//! End-to-end service flow against the JSON store: two users sign up,
//! submit builds, like each other's work, browse the feed, and run the LFG
//! board — everything the CLI does, minus the terminal.

use chrono::{Duration, Utc};
use tempfile::TempDir;

use hooplab_core::aggregate::category_breakdown;
use hooplab_core::compare::DEFAULT_RANKED_FIELDS;
use hooplab_core::domain::{BuildDraft, GameMode, Position};
use hooplab_core::store::{DocumentStore, JsonStore};
use hooplab_service::{
    Authenticator, BuildService, Feed, LfgService, ProfileService, RankCache, Session, SessionFile,
};

fn guard_draft(height: u32, weight: u32) -> BuildDraft {
    BuildDraft {
        position: Position::SG,
        role: "Lock".to_string(),
        height,
        weight,
        wingspan: height + 2,
        ..BuildDraft::default()
    }
}

#[test]
fn full_session_flow() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::open(dir.path().join("data")).unwrap();

    // Sign-up, with the session surviving a "restart" via the session file.
    let auth = Authenticator::new(&store);
    let alice = auth.sign_up("alice@example.com", "hunter22").unwrap();
    let bob = auth.sign_up("bob@example.com", "hunter22").unwrap();

    let session_file = SessionFile::new(dir.path().join("session.json"));
    session_file.save(&alice).unwrap();
    let restored: Session = session_file.load().unwrap();
    assert_eq!(restored, alice);

    // Submissions stamp gamertags and link builds to their owners.
    let builds = BuildService::new(&store);
    let tall = builds
        .submit(&alice, &guard_draft(80, 210), Some("AliceHoops"))
        .unwrap();
    let short = builds
        .submit(&bob, &guard_draft(76, 170), Some("BobBuckets"))
        .unwrap();

    // Bob likes Alice's build; the feed puts it first.
    builds.like(&bob, &tall.id).unwrap();
    let cache = RankCache::new();
    let feed = Feed::with_cache(&store, &cache);
    let cards = feed.most_liked(10).unwrap();
    assert_eq!(cards[0].build.id, tall.id);
    assert_eq!(cards[0].build.likes, 1);

    // Both cards carry percentile annotations; the taller, heavier build
    // ranks at 100 among the two SGs.
    let report = cards[0].percentile.as_ref().unwrap();
    assert_eq!(report.peer_count, 2);
    assert_eq!(report.overall, 100.0);
    let other = cards[1].percentile.as_ref().unwrap();
    assert_eq!(other.overall, 50.0);
    assert_eq!(cache.len(), 2);

    // Detail view: ranking plus category breakdown.
    let fetched = store.build(&tall.id).unwrap();
    let peers = store.peers_by_position(fetched.position).unwrap();
    let detail = cache
        .report(&fetched, &peers, &DEFAULT_RANKED_FIELDS)
        .unwrap();
    assert_eq!(detail.overall, 100.0);
    let slices = category_breakdown(&fetched).unwrap();
    assert_eq!(slices.len(), 4);

    // LFG: post, board, purge.
    let lfg = LfgService::new(&store);
    let post = lfg.post(&alice, GameMode::Threes, "need two for 3s").unwrap();
    let board = lfg.board(&bob).unwrap();
    assert_eq!(board.total, 1);
    assert_eq!(board.others.len(), 1);
    assert!(board.own.is_none());

    // Nothing is expired yet; an aggressive TTL purges it.
    assert_eq!(lfg.purge_expired(Duration::minutes(60), Utc::now()).unwrap(), 0);
    assert_eq!(
        lfg.purge_expired(Duration::minutes(0), Utc::now() + Duration::minutes(1))
            .unwrap(),
        1
    );
    assert_eq!(store.post_count().unwrap(), 0);

    // Deleting Bob's build removes it from the catalog and his profile.
    builds.delete(&bob, &short.id).unwrap();
    let profile = ProfileService::new(&store).view(&bob).unwrap();
    assert_eq!(profile.build_count(), 0);
    assert_eq!(profile.gamertag, "BobBuckets");

    // The deleted build left the peer set: Alice now ranks alone.
    let peers = store.peers_by_position(Position::SG).unwrap();
    assert_eq!(peers.len(), 1);
    let solo = cache.report(&fetched, &peers, &DEFAULT_RANKED_FIELDS).unwrap();
    assert_eq!(solo.overall, 100.0);
    assert_eq!(solo.peer_count, 1);

    // Sign out.
    session_file.clear().unwrap();
    assert!(session_file.load().is_none());

    // Everything above went through the disk store: reopen and recheck.
    let reopened = JsonStore::open(dir.path().join("data")).unwrap();
    assert_eq!(reopened.builds().unwrap().len(), 1);
    assert_eq!(reopened.build(&tall.id).unwrap().likes, 1);
    assert!(post.id.0.len() == 20);
}
