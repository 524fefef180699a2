use bitcastle::board::{Board, Piece};
use bitcastle::moves::movegen::legal_moves;
use bitcastle::moves::types::Move;
use bitcastle::search::tt::{MoveSkeleton, NodeType, TTEntry, TranspositionTable};

fn some_move() -> Move {
    let mut b = Board::new();
    legal_moves(&mut b)[0]
}

#[test]
fn probe_returns_what_was_stored() {
    let mut tt = TranspositionTable::new(1);
    let hash = Board::new().zobrist();
    let mv = some_move();

    tt.add(hash, 42, 6, NodeType::Exact, Some(mv));
    let entry = tt.probe(hash).expect("just stored");
    assert_eq!(entry.score, 42);
    assert_eq!(entry.depth, 6);
    assert_eq!(entry.flag, NodeType::Exact);
    assert!(entry.best_move.matches(&mv));
    assert_eq!(entry.partial_hash, (hash & 0xFFFF) as u16);
}

#[test]
fn unknown_positions_miss() {
    let tt = TranspositionTable::new(1);
    assert!(tt.probe(0xDEAD_BEEF_1234_5678).is_none());
    assert_eq!(*tt.get_entry(0xDEAD_BEEF_1234_5678), TTEntry::default());
    assert_eq!(tt.usage_permille(), 0);
}

#[test]
fn deeper_exact_survives_shallower_bound() {
    let mut tt = TranspositionTable::new(1);
    let hash = 0x0123_4567_89AB_CDEF;

    tt.add(hash, 100, 8, NodeType::Exact, None);
    tt.add(hash, -50, 3, NodeType::LowerBound, None);
    let e = tt.probe(hash).expect("stored");
    assert_eq!((e.score, e.depth, e.flag), (100, 8, NodeType::Exact));

    // A shallower EXACT result does replace it.
    tt.add(hash, 7, 2, NodeType::Exact, None);
    let e = tt.probe(hash).expect("stored");
    assert_eq!((e.score, e.depth), (7, 2));
}

#[test]
fn bounds_replace_each_other() {
    let mut tt = TranspositionTable::new(1);
    let hash = 0xFEED_0000_0000_0001;
    tt.add(hash, 10, 9, NodeType::UpperBound, None);
    tt.add(hash, 20, 1, NodeType::LowerBound, None);
    let e = tt.probe(hash).expect("stored");
    assert_eq!((e.score, e.flag), (20, NodeType::LowerBound));
}

#[test]
fn slot_collisions_are_tolerated() {
    // With a power-of-two slot count the stored 16 bits cannot tell these apart.
    let mut tt = TranspositionTable::new(1);
    let a = 5u64;
    let b = a + tt.len() as u64;

    tt.add(a, 1, 4, NodeType::Exact, None);
    tt.add(b, 2, 4, NodeType::Exact, None);
    assert_eq!(tt.probe(a).map(|e| e.score), Some(2));
    assert_eq!(tt.probe(b).map(|e| e.score), Some(2));

    // A different low half-word is a miss.
    assert!(tt.probe(a + 1).is_none());
}

#[test]
fn reset_clears_everything() {
    let mut tt = TranspositionTable::new(1);
    for h in 0..2000u64 {
        tt.add(h * 7919, 1, 1, NodeType::Exact, None);
    }
    assert!(tt.usage_permille() > 0);
    tt.reset();
    assert_eq!(tt.occupied(), 0);
    assert_eq!(tt.usage_permille(), 0);
    assert!(tt.probe(7919).is_none());
}

#[test]
fn skeleton_ignores_flags() {
    let mv = some_move();
    let sk = MoveSkeleton::from_move(Some(mv));
    assert_eq!(sk.from_sq(), mv.from);
    assert_eq!(sk.to_sq(), mv.to);
    assert_eq!(sk.promotion(), None::<Piece>);
    assert!(MoveSkeleton::from_move(None).is_none());
}

#[test]
fn usage_counts_slots_anywhere_in_the_table() {
    let mut tt = TranspositionTable::new(1);
    let len = tt.len() as u64;
    // Fill the last 1% of the table only.
    let start = len - len / 100;
    for idx in start..len {
        tt.add(idx, 1, 1, NodeType::Exact, None);
    }
    assert_eq!(tt.occupied(), (len - start) as usize);
    assert_eq!(tt.usage_permille(), (len - start) as usize * 1000 / len as usize);
    assert!(tt.usage_permille() >= 9);
}
