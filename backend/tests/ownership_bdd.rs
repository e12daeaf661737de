//! Behavioural tests for ownership-checked operations over the HTTP surface.
#[path = "ownership_bdd/harness.rs"]
mod harness;
#[path = "ownership_bdd/http.rs"]
mod http;

use actix_web::http::Method;
use chromascape_backend::domain::ports::{DeviceRepository, PatternRepository};
use chromascape_backend::domain::{NewPattern, PatternContent, PatternId, UserId};
use harness::{
    ALICE_TOKEN, BOB_TOKEN, CAROL_TOKEN, LAMP_TOKEN, SharedWorld, WorldFixture, with_store,
};
use http::{JsonRequest, perform_json_request};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

const MISSING_PATTERN_ID: &str = "999999";

#[fixture]
fn world() -> WorldFixture {
    harness::world()
}

fn seed_pattern(world: &SharedWorld, owner: UserId) -> PatternId {
    with_store(world, |store| async move {
        PatternRepository::insert(
            &store,
            &NewPattern {
                owner,
                content: PatternContent::new("AB"),
            },
        )
        .await
        .expect("insert pattern")
        .id
    })
}

fn send(world: &SharedWorld, token: Option<&str>, method: Method, path: &str, payload: Value) {
    perform_json_request(
        world,
        JsonRequest {
            token,
            method,
            path,
            payload: Some(payload),
        },
    );
}

fn assert_status_and_code(world: &WorldFixture, status: u16, code: &str) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(status));
    let body = ctx.last_body.as_ref().expect("response body");
    assert_eq!(body.get("code").and_then(Value::as_str), Some(code));
}

fn assert_lamp_owner(world: &WorldFixture, expected: Option<UserId>) {
    let shared = world.world();
    let lamp = shared.borrow().lamp();
    let device = shared
        .borrow()
        .store
        .device(lamp)
        .expect("lookup lamp")
        .expect("lamp exists");
    assert_eq!(device.user_id, expected);
}

#[given("a running server backed by an in-memory store")]
fn a_running_server_backed_by_an_in_memory_store(world: &WorldFixture) {
    let _ = world;
}

#[given("alice and bob are registered users")]
fn alice_and_bob_are_registered_users(world: &WorldFixture) {
    harness::register_users(&world.world());
}

#[given("the lamp device is registered and unpaired")]
fn the_lamp_device_is_registered_and_unpaired(world: &WorldFixture) {
    harness::register_lamp(&world.world());
}

#[given("alice has created a pattern")]
fn alice_has_created_a_pattern(world: &WorldFixture) {
    let shared = world.world();
    let alice = shared.borrow().alice();
    let pattern = seed_pattern(&shared, alice);
    shared.borrow_mut().alice_pattern = Some(pattern);
}

#[given("bob has created a pattern")]
fn bob_has_created_a_pattern(world: &WorldFixture) {
    let shared = world.world();
    let bob = shared.borrow().bob();
    let pattern = seed_pattern(&shared, bob);
    shared.borrow_mut().bob_pattern = Some(pattern);
}

#[given("the lamp is paired with alice")]
fn the_lamp_is_paired_with_alice(world: &WorldFixture) {
    let shared = world.world();
    let (lamp, alice) = {
        let ctx = shared.borrow();
        (ctx.lamp(), ctx.alice())
    };
    with_store(&shared, |store| async move {
        DeviceRepository::pair(&store, lamp, alice)
            .await
            .expect("pair lamp")
            .require_match("device")
            .expect("lamp was unpaired");
    });
}

#[when("a client with an unknown token creates a pattern")]
fn a_client_with_an_unknown_token_creates_a_pattern(world: &WorldFixture) {
    send(
        &world.world(),
        Some("forged-token"),
        Method::POST,
        "/api/user/pattern",
        json!({"content": "AB"}),
    );
}

#[when("carol requests her profile")]
fn carol_requests_her_profile(world: &WorldFixture) {
    perform_json_request(
        &world.world(),
        JsonRequest {
            token: Some(CAROL_TOKEN),
            method: Method::GET,
            path: "/api/user",
            payload: None,
        },
    );
}

#[when("alice registers again")]
fn alice_registers_again(world: &WorldFixture) {
    perform_json_request(
        &world.world(),
        JsonRequest {
            token: Some(ALICE_TOKEN),
            method: Method::POST,
            path: "/api/user",
            payload: None,
        },
    );
}

#[when("alice creates a pattern")]
fn alice_creates_a_pattern(world: &WorldFixture) {
    send(
        &world.world(),
        Some(ALICE_TOKEN),
        Method::POST,
        "/api/user/pattern",
        json!({"content": "AB"}),
    );
}

fn delete_alice_pattern_as(world: &WorldFixture, token: &str) {
    let shared = world.world();
    let pattern = shared.borrow().alice_pattern.expect("alice pattern");
    send(
        &shared,
        Some(token),
        Method::DELETE,
        "/api/user/pattern",
        json!({"pattern_id": pattern.to_string()}),
    );
}

#[when("bob deletes alice's pattern")]
fn bob_deletes_alices_pattern(world: &WorldFixture) {
    delete_alice_pattern_as(world, BOB_TOKEN);
}

#[when("alice deletes her pattern")]
fn alice_deletes_her_pattern(world: &WorldFixture) {
    delete_alice_pattern_as(world, ALICE_TOKEN);
}

fn pair_lamp_with(world: &WorldFixture, user: UserId) {
    send(
        &world.world(),
        Some(LAMP_TOKEN),
        Method::PATCH,
        "/api/device/user",
        json!({"user_id": user.to_string()}),
    );
}

#[when("the lamp pairs with alice")]
fn the_lamp_pairs_with_alice(world: &WorldFixture) {
    let alice = world.world().borrow().alice();
    pair_lamp_with(world, alice);
}

#[when("the lamp pairs with bob")]
fn the_lamp_pairs_with_bob(world: &WorldFixture) {
    let bob = world.world().borrow().bob();
    pair_lamp_with(world, bob);
}

fn remove_lamp_as(world: &WorldFixture, token: &str) {
    let shared = world.world();
    let lamp = shared.borrow().lamp();
    send(
        &shared,
        Some(token),
        Method::GET,
        "/api/user/remove_device",
        json!({"device_id": lamp.to_string()}),
    );
}

#[when("bob removes the lamp")]
fn bob_removes_the_lamp(world: &WorldFixture) {
    remove_lamp_as(world, BOB_TOKEN);
}

#[when("alice removes the lamp")]
fn alice_removes_the_lamp(world: &WorldFixture) {
    remove_lamp_as(world, ALICE_TOKEN);
}

fn fetch_pattern(world: &WorldFixture, id: &str) {
    perform_json_request(
        &world.world(),
        JsonRequest {
            token: None,
            method: Method::GET,
            path: &format!("/api/pattern/{id}"),
            payload: None,
        },
    );
}

#[when("an anonymous client fetches alice's pattern")]
fn an_anonymous_client_fetches_alices_pattern(world: &WorldFixture) {
    let pattern = world.world().borrow().alice_pattern.expect("alice pattern");
    fetch_pattern(world, &pattern.to_string());
}

#[when("an anonymous client fetches a missing pattern")]
fn an_anonymous_client_fetches_a_missing_pattern(world: &WorldFixture) {
    fetch_pattern(world, MISSING_PATTERN_ID);
}

#[when("alice schedules bob's pattern on the lamp")]
fn alice_schedules_bobs_pattern_on_the_lamp(world: &WorldFixture) {
    let shared = world.world();
    let (lamp, pattern) = {
        let ctx = shared.borrow();
        (ctx.lamp(), ctx.bob_pattern.expect("bob pattern"))
    };
    send(
        &shared,
        Some(ALICE_TOKEN),
        Method::POST,
        "/api/user/pattern_schedule",
        json!({
            "device_id": lamp.to_string(),
            "pattern_id": pattern.to_string(),
            "scheduled_time": "2030-01-01T20:00:00Z",
        }),
    );
}

#[then("the response is ok")]
fn the_response_is_ok(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(200));
}

#[then("the response is success")]
fn the_response_is_success(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(200));
    assert_eq!(ctx.last_body, Some(json!("success")));
}

#[then("the response is unauthorized")]
fn the_response_is_unauthorized(world: &WorldFixture) {
    assert_status_and_code(world, 401, "unauthorized");
}

#[then("the response is a not found or not owned error")]
fn the_response_is_a_not_found_or_not_owned_error(world: &WorldFixture) {
    assert_status_and_code(world, 400, "not_found_or_not_owned");
}

#[then("the response is a conflict")]
fn the_response_is_a_conflict(world: &WorldFixture) {
    assert_status_and_code(world, 409, "conflict");
}

#[then("no patterns are stored")]
fn no_patterns_are_stored(world: &WorldFixture) {
    let shared = world.world();
    let (alice, bob) = {
        let ctx = shared.borrow();
        (ctx.alice(), ctx.bob())
    };
    let stored = with_store(&shared, |store| async move {
        let mut total = 0;
        for owner in [alice, bob] {
            total += PatternRepository::list_for_owner(&store, owner)
                .await
                .expect("list patterns")
                .len();
        }
        total
    });
    assert_eq!(stored, 0);
}

#[then("the pattern belongs to alice with content AB")]
fn the_pattern_belongs_to_alice_with_content_ab(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    let body = ctx.last_body.as_ref().expect("response body");
    let alice = ctx.alice().to_string();
    assert_eq!(body.get("userId").and_then(Value::as_str), Some(alice.as_str()));
    assert_eq!(body.get("content").and_then(Value::as_str), Some("AB"));
    assert!(body.get("id").and_then(Value::as_str).is_some());
    assert!(body.get("createdAt").and_then(Value::as_str).is_some());
}

#[then("alice's pattern is still stored")]
fn alices_pattern_is_still_stored(world: &WorldFixture) {
    let shared = world.world();
    let pattern = shared.borrow().alice_pattern.expect("alice pattern");
    let found = with_store(&shared, |store| async move {
        PatternRepository::find_by_id(&store, pattern)
            .await
            .expect("lookup pattern")
    });
    assert!(found.is_some());
}

#[then("the response is alice's pattern")]
fn the_response_is_alices_pattern(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    let body = ctx.last_body.as_ref().expect("response body");
    let expected = ctx.alice_pattern.expect("alice pattern").to_string();
    assert_eq!(body.get("id").and_then(Value::as_str), Some(expected.as_str()));
}

#[then("the response body is null")]
fn the_response_body_is_null(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_body, Some(Value::Null));
}

#[then("the lamp is owned by alice")]
fn the_lamp_is_owned_by_alice(world: &WorldFixture) {
    let alice = world.world().borrow().alice();
    assert_lamp_owner(world, Some(alice));
}

#[then("the lamp is owned by bob")]
fn the_lamp_is_owned_by_bob(world: &WorldFixture) {
    let bob = world.world().borrow().bob();
    assert_lamp_owner(world, Some(bob));
}

#[then("the lamp is unpaired")]
fn the_lamp_is_unpaired(world: &WorldFixture) {
    assert_lamp_owner(world, None);
}

#[then("no schedules are stored")]
fn no_schedules_are_stored(world: &WorldFixture) {
    let shared = world.world();
    let count = shared.borrow().store.schedule_count().expect("count schedules");
    assert_eq!(count, 0);
}

#[scenario(
    path = "tests/features/ownership.feature",
    name = "Unverified credentials cannot mutate records"
)]
fn unverified_credentials_cannot_mutate_records(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/ownership.feature",
    name = "Verified identities without a user record are unauthorized"
)]
fn verified_identities_without_a_user_record_are_unauthorized(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/ownership.feature",
    name = "Creating a pattern returns the owned record"
)]
fn creating_a_pattern_returns_the_owned_record(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/ownership.feature",
    name = "Patterns can only be deleted by their owner"
)]
fn patterns_can_only_be_deleted_by_their_owner(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/ownership.feature",
    name = "A device pairs only while unpaired"
)]
fn a_device_pairs_only_while_unpaired(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/ownership.feature",
    name = "Only the owner can unpair a device"
)]
fn only_the_owner_can_unpair_a_device(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/ownership.feature",
    name = "Patterns are publicly readable"
)]
fn patterns_are_publicly_readable(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/ownership.feature",
    name = "Schedules require ownership of the device and the pattern"
)]
fn schedules_require_ownership_of_the_device_and_the_pattern(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/ownership.feature",
    name = "A user record is created once per identity"
)]
fn a_user_record_is_created_once_per_identity(world: WorldFixture) {
    drop(world);
}
