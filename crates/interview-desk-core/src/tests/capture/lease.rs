use crate::{
    DeviceStream, StreamLease,
    tests::fakes::FakeDevices,
};

/// WHAT: Explicit release releases the device once
/// WHY: The lease consumes itself so a second release cannot be written
#[test]
fn given_lease_when_released_then_stream_released_once() {
    // Given: A lease over a fresh stream
    let devices = FakeDevices::granting();
    let lease = StreamLease::new(devices.make_stream());
    assert_eq!(lease.label(), "fake-camera-1");

    // When: Releasing it
    lease.release();

    // Then: Exactly one release, even after the lease is gone
    assert_eq!(devices.counters.released(), 1);
}

/// WHAT: Dropping an unreleased lease releases the device
/// WHY: Early returns between acquire and teardown must not leak the device
#[test]
fn given_lease_when_dropped_then_stream_released() {
    // Given: A lease held in a scope
    let devices = FakeDevices::granting();
    {
        let lease = StreamLease::new(devices.make_stream());
        assert!(lease.stream().is_some());

        // When: The scope ends
    }

    // Then: The stream was released once
    assert_eq!(devices.counters.acquired(), 1);
    assert_eq!(devices.counters.released(), 1);
}

/// WHAT: The leased stream stays usable until release
/// WHY: Track toggles go through the lease
#[test]
fn given_lease_when_borrowing_stream_mutably_then_label_available() {
    // Given: A lease
    let devices = FakeDevices::granting();
    let mut lease = StreamLease::new(devices.make_stream());

    // When: Borrowing the stream
    let label = lease.stream_mut().map(|stream| stream.label());

    // Then: It is the acquired stream and nothing was released yet
    assert_eq!(label.as_deref(), Some("fake-camera-1"));
    assert_eq!(devices.counters.released(), 0);
}
