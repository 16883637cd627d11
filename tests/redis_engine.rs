//! These tests need a running redis server. The database at `CACHETRACE_URL` (or
//! redis://127.0.0.1:6379/15 if unset) is flushed, so point it at a scratch database.
//!
//! Run with: cargo test --test redis_engine -- --ignored

use cachetrace::{Cache, RedisEngine, Replay, StoreEngine, STORE_OPERATION};

fn redis_url() -> String {
    std::env::var("CACHETRACE_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/15".to_owned())
}

fn open() -> RedisEngine {
    RedisEngine::open(&redis_url()).expect("redis server is reachable")
}

#[test]
#[ignore]
fn redis_store_get_and_replay() {
    let mut cache = Cache::new(open()).unwrap();

    let k1 = cache.store("cat").unwrap();
    let k2 = cache.store(42).unwrap();
    let k3 = cache.store(vec![0u8, 1, 2]).unwrap();

    assert_eq!(cache.get(&k1).unwrap(), Some(b"cat".to_vec()));
    assert_eq!(cache.get_int(&k2).unwrap(), 42);
    assert_eq!(cache.get_int("missing").unwrap(), 0);
    assert_eq!(cache.get(&k3).unwrap(), Some(vec![0u8, 1, 2]));
    assert_eq!(cache.get("missing").unwrap(), None);

    // a second connection sees the same history
    let mut other = open();
    let replay = Replay::load(&mut other, STORE_OPERATION).unwrap();
    assert_eq!(replay.calls, 3);
    assert_eq!(replay.history[0].input, r#"("cat",)"#);
    assert_eq!(replay.history[1].output, k2);
}

#[test]
#[ignore]
fn redis_construction_flushes() {
    let mut engine = open();
    engine.set("left-over", b"x").unwrap();
    engine.rpush("left-over-list", b"x").unwrap();

    let mut cache = Cache::new(engine).unwrap();
    assert_eq!(cache.get("left-over").unwrap(), None);
    assert!(cache.engine_mut().lrange("left-over-list", 0, -1).unwrap().is_empty());
}

#[test]
#[ignore]
fn redis_commands() {
    let mut engine = open();
    engine.flush_db().unwrap();

    assert_eq!(engine.incr("n").unwrap(), 1);
    assert_eq!(engine.incr("n").unwrap(), 2);
    assert_eq!(engine.rpush("l", b"a").unwrap(), 1);
    assert_eq!(engine.rpush("l", b"b").unwrap(), 2);
    assert_eq!(engine.lrange("l", -1, -1).unwrap(), vec![b"b".to_vec()]);
    assert!(engine.incr("l").is_err());
}

#[test]
fn bad_url_is_an_error() {
    assert!(RedisEngine::open("not a url").is_err());
}
