use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"layerdoc");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_bytes(b"layer");
    b.write_bytes(b"doc");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn string_fields_are_separated() {
    let mut a = Fnv1a64::new_default();
    a.write_str("ab");
    a.write_str("c");
    let mut b = Fnv1a64::new_default();
    b.write_str("a");
    b.write_str("bc");
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn signed_zero_hashes_equal() {
    let mut a = Fnv1a64::new_default();
    a.write_f64(0.0);
    let mut b = Fnv1a64::new_default();
    b.write_f64(-0.0);
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn content_id_has_prefix_and_fixed_width() {
    let id = content_id("shadow", 0xdead_beef_0000_0001);
    assert!(id.starts_with("shadow-"));
    assert_eq!(id.len(), "shadow-".len() + 8);
}
