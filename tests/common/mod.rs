use proptest::prelude::*;

#[allow(dead_code)]
pub(super) fn assert_eq_iters<I: Iterator, J: Iterator<Item = I::Item>>(
    mut i: I,
    mut j: J,
) where
    I::Item: std::fmt::Debug + Eq, // same inferred for J::Item
{
    loop {
        match (i.next(), j.next()) {
            (None, None) => return,
            (a, b) => assert_eq!(a, b),
        }
    }
}

pub(super) type SmallIntPairs = Vec<(u16, u16)>;

pub(super) fn small_int_pairs() -> impl Strategy<Value = SmallIntPairs> {
    prop::collection::vec((0u16..1024u16, 0u16..1024u16), 0..512)
}

// Few distinct keys, so that overwrites and repeated lookups are common.
#[allow(dead_code)]
pub(super) fn tiny_int_pairs() -> impl Strategy<Value = SmallIntPairs> {
    prop::collection::vec((0u16..64u16, 0u16..1024u16), 0..128)
}

#[allow(dead_code)]
pub(super) fn string_u16_pairs() -> impl Strategy<Value = Vec<(String, u16)>> {
    prop::collection::vec(("[a-z]{0,2}", 0u16..1024u16), 0..512)
}
