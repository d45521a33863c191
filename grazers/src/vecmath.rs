/// contains some very simple helpers for 2d vectors

pub type Vector = [f64; 2];

/// calculates the length of a vector
pub fn len(inp: Vector) -> f64 {
    ((inp[0] * inp[0]) + (inp[1] * inp[1])).sqrt()
}

/// distance between two points
pub fn dist(a: Vector, b: Vector) -> f64 {
    len(sub(b, a))
}

/// turns the input into a vector that has length 1
/// returns None for the zero vector, it has no direction
pub fn norm(mut inp: Vector) -> Option<Vector> {
    let len = len(inp);
    if len == 0. || !len.is_finite() {
        return None;
    }
    inp[0] /= len;
    inp[1] /= len;
    Some(inp)
}

/// componet-wise addition
pub fn add(mut a: Vector, b: Vector) -> Vector {
    a[0] += b[0];
    a[1] += b[1];
    a
}

/// componet-wise subtraction, a - b
pub fn sub(mut a: Vector, b: Vector) -> Vector {
    a[0] -= b[0];
    a[1] -= b[1];
    a
}

/// scales a vector by a scalar
pub fn scale(mut a: Vector, scalar: f64) -> Vector {
    a[0] *= scalar;
    a[1] *= scalar;
    a
}

/// linear interpolation, t = 0 is start, t = 1 is end
/// both ends are hit exactly, no floating point drift
pub fn lerp(start: Vector, end: Vector, t: f64) -> Vector {
    add(scale(start, 1. - t), scale(end, t))
}

#[test]
fn norm_zero() {
    assert_eq!(norm([0., 0.]), None);
    assert_eq!(norm([0., -4.]), Some([0., -1.]));
}

#[test]
fn lerp_ends() {
    let a = [1., 2.];
    let b = [11., -8.];
    assert_eq!(lerp(a, b, 0.), a);
    assert_eq!(lerp(a, b, 1.), b);
    assert_eq!(lerp(a, b, 0.5), [6., -3.]);
}

#[test]
fn pythagoras() {
    assert_eq!(dist([1., 1.], [4., 5.]), 5.);
}
