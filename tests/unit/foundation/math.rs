use super::*;

#[test]
fn floor_div_rounds_towards_negative_infinity() {
    assert_eq!(floor_div(0, 256), 0);
    assert_eq!(floor_div(255, 256), 0);
    assert_eq!(floor_div(256, 256), 1);
    assert_eq!(floor_div(-1, 256), -1);
    assert_eq!(floor_div(-256, 256), -1);
    assert_eq!(floor_div(-257, 256), -2);
}

#[test]
fn fast_sqrt_tracks_exact_sqrt() {
    assert_eq!(fast_sqrt(0.0), 0.0);
    for z in [1.0f32, 2.0, 3.0, 10.0, 99.5, 1024.0, 65_536.0, 123_456.0] {
        let exact = z.sqrt();
        let approx = fast_sqrt(z);
        let rel = (approx - exact).abs() / exact;
        assert!(rel < 0.065, "z={z} exact={exact} approx={approx}");
    }
}

#[test]
fn unit_to_u8_clamps_and_truncates() {
    assert_eq!(unit_to_u8(0.0), 0);
    assert_eq!(unit_to_u8(1.0), 255);
    assert_eq!(unit_to_u8(0.5), 127);
    assert_eq!(unit_to_u8(-3.0), 0);
    assert_eq!(unit_to_u8(7.0), 255);
}
