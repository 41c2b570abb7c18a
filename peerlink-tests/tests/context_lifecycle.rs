//! Lifecycle tests: construction, sharing, teardown.

use peerlink_context::{CallConfig, ConnectionContext, ContextDependencies};
use peerlink_runtime::ThreadHandle;

#[test]
fn default_bundle_builds_every_subsystem() {
    peerlink_tests::init_tracing();

    let ctx = ConnectionContext::create(ContextDependencies::new()).unwrap();

    assert!(ctx.signaling_thread().is_current());

    let signaling = ctx.signaling_token();
    assert!(!ctx
        .channel_manager(&signaling)
        .media_engine()
        .audio_codecs()
        .is_empty());
    assert!(!ctx.default_network_manager(&signaling).networks().is_empty());

    // The call factory lives on the worker thread; use it there.
    let ctx_on_worker = ctx.clone();
    let (first, second) = ctx.worker_thread().invoke(move || {
        let worker = ctx_on_worker.worker_token();
        let factory = ctx_on_worker.call_factory(&worker);

        let first = factory.create_call(CallConfig::default());
        let second = factory.create_call(CallConfig {
            audio: true,
            video: true,
        });
        (first.id(), second.id())
    });

    assert_ne!(first, second);
}

#[test]
fn owned_threads_stop_and_join_on_teardown() {
    peerlink_tests::init_tracing();

    let ctx = ConnectionContext::create(ContextDependencies::new()).unwrap();
    let worker = ctx.worker_thread().clone();
    let network = ctx.network_thread().clone();

    assert!(worker.is_running());
    assert!(network.is_running());

    drop(ctx);

    assert!(!worker.is_running());
    assert!(!network.is_running());
}

#[test]
fn supplied_threads_are_borrowed_and_survive_teardown() {
    peerlink_tests::init_tracing();

    let network = ThreadHandle::spawn("external_network").unwrap();
    let worker = ThreadHandle::spawn("external_worker").unwrap();

    {
        let ctx = ConnectionContext::create(
            ContextDependencies::new()
                .worker_thread(worker.clone())
                .network_thread(network.clone()),
        )
        .unwrap();

        // The context adopted the supplied threads instead of spawning.
        assert!(ctx.worker_thread().same_thread(&worker));
        assert!(ctx.network_thread().same_thread(&network));
    }

    // Both threads are still running and usable after teardown.
    assert!(network.is_running());
    assert!(worker.is_running());
    assert_eq!(network.invoke(|| 7 * 6), 42);

    worker.stop();
    network.stop();
}

#[test]
fn context_lives_until_the_last_reference_drops() {
    peerlink_tests::init_tracing();

    let ctx = ConnectionContext::create(ContextDependencies::new()).unwrap();
    let worker = ctx.worker_thread().clone();

    let survivor = {
        let inner = ctx.clone();
        inner
    };

    drop(ctx);

    // One reference remains: subsystems must still be live.
    assert!(worker.is_running());
    let token = survivor.signaling_token();
    let socket = survivor
        .default_socket_factory(&token)
        .create_udp_socket("127.0.0.1:0".parse().unwrap())
        .unwrap();
    assert!(socket.local_addr().is_ok());

    drop(survivor);
    assert!(!worker.is_running());
}

#[test]
fn shared_worker_and_network_thread_is_a_construction_error() {
    peerlink_tests::init_tracing();

    let shared = ThreadHandle::spawn("one_loop").unwrap();

    let result = ConnectionContext::create(
        ContextDependencies::new()
            .worker_thread(shared.clone())
            .network_thread(shared.clone()),
    );

    assert!(result.is_err());
    // The rejected bundle's thread was borrowed; it keeps running.
    assert!(shared.is_running());
    shared.stop();
}

#[test]
fn teardown_off_the_signaling_thread_is_fatal() {
    peerlink_tests::init_tracing();

    let ctx = ConnectionContext::create(ContextDependencies::new()).unwrap();

    let outcome = std::thread::spawn(move || drop(ctx)).join();

    assert!(outcome.is_err());
}
