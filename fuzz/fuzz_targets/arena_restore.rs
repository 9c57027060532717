#![no_main]

use codec::{capture, restore_from_bytes, SnapshotBuffer, DEFAULT_CAPACITY};
use demo_arena::ArenaState;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary blobs must either be rejected or restore to a state whose
    // capture is stable. Booleans normalise to 0/1 on the first pass.
    if let Ok(state) = restore_from_bytes::<ArenaState>(data) {
        let mut buf = SnapshotBuffer::<DEFAULT_CAPACITY>::new();
        let bytes = capture(&state, &mut buf).expect("restored state must capture");
        assert_eq!(bytes, data.len());
        let first = buf.written().to_vec();

        let again: ArenaState = restore_from_bytes(&first).expect("captured blob must restore");
        capture(&again, &mut buf).expect("restored state must capture");
        assert_eq!(buf.written(), first.as_slice());
    }
});
