use super::*;

#[test]
fn unit_quantization_matches_8bit_attachments() {
    assert_eq!(unit_to_u8(0.0), 0);
    assert_eq!(unit_to_u8(1.0), 255);
    assert_eq!(unit_to_u8(0.75), 191);
    assert_eq!(unit_to_u8(2.0), 255);
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(f32::NAN), 0);
}

#[test]
fn u8_roundtrips_through_unit() {
    for v in [0u8, 1, 127, 128, 254, 255] {
        assert_eq!(unit_to_u8(u8_to_unit(v)), v);
    }
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
    assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
}
