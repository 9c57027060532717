#![no_main]

use buffer::{Handle, SnapshotBuffer};
use libfuzzer_sys::fuzz_target;

const CAPACITY: usize = 64;

fuzz_target!(|data: &[u8]| {
    let mut buf = SnapshotBuffer::<CAPACITY>::new();
    let mut idx = 0usize;

    // Input bytes drive a bounded sequence of operations; the cursor must
    // never pass capacity and a failed access must not move it.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 10;
        idx += 1;
        let before = buf.cursor();

        let ok = match op {
            0 => buf.write_integer(i32::from(op)).is_ok(),
            1 => buf.write_float(f32::from(op)).is_ok(),
            2 => buf.write_boolean(idx % 2 == 0).is_ok(),
            3 => buf.write_pointer(Handle::new(idx as u64)).is_ok(),
            4 => buf.read_integer().is_ok(),
            5 => buf.read_float().is_ok(),
            6 => buf.read_boolean().is_ok(),
            7 => buf.read_pointer().is_ok(),
            8 => {
                buf.begin();
                true
            }
            _ => {
                let end = data.len().min(idx + CAPACITY + 1);
                buf.load(&data[idx..end]).is_ok()
            }
        };

        assert!(buf.cursor() <= CAPACITY);
        if !ok {
            assert_eq!(buf.cursor(), before);
        }
    }
});
