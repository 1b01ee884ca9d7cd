use super::*;

use std::collections::BTreeSet;

#[test]
fn hands_out_each_index_in_order_then_sentinel() {
    let cursor = DispatchCursor::new(FrameRange::from_offset(5, 3).unwrap());
    assert_eq!(cursor.state(), DispatchState::Idle);
    assert_eq!(cursor.remaining(), 3);

    assert_eq!(cursor.next_index(), Some(FrameIndex(5)));
    assert_eq!(cursor.state(), DispatchState::Dispatching);
    assert_eq!(cursor.next_index(), Some(FrameIndex(6)));
    assert_eq!(cursor.next_index(), Some(FrameIndex(7)));
    assert_eq!(cursor.state(), DispatchState::Drained);

    for _ in 0..3 {
        assert_eq!(cursor.next_index(), None);
    }
    assert_eq!(cursor.remaining(), 0);
    assert_eq!(cursor.state(), DispatchState::Drained);
}

#[test]
fn empty_range_is_drained_from_the_start() {
    let cursor = DispatchCursor::new(FrameRange::from_offset(9, 0).unwrap());
    assert_eq!(cursor.state(), DispatchState::Drained);
    assert_eq!(cursor.next_index(), None);
}

#[test]
fn concurrent_requests_never_duplicate() {
    let range = FrameRange::from_offset(100, 5_000).unwrap();
    let cursor = DispatchCursor::new(range);

    let claimed: Vec<Vec<u64>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cursor = &cursor;
                scope.spawn(move || {
                    let mut mine = Vec::new();
                    while let Some(f) = cursor.next_index() {
                        mine.push(f.0);
                    }
                    mine
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut all: Vec<u64> = claimed.iter().flatten().copied().collect();
    assert_eq!(all.len(), 5_000);
    let unique: BTreeSet<u64> = all.iter().copied().collect();
    assert_eq!(unique.len(), 5_000);
    all.sort_unstable();
    assert_eq!(all, (100..5_100).collect::<Vec<_>>());

    for per_worker in claimed {
        assert!(per_worker.windows(2).all(|w| w[0] < w[1]));
    }
}
