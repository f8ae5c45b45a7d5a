use cgmath::InnerSpace;

use super::math::Vec3;
use super::projection::Ray;

const EPS: f64 = 1.0e-9;

pub fn ray_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f64> {
    let edge1 = b - a;
    let edge2 = c - a;
    let pvec = ray.direction.cross(edge2);
    let det = edge1.dot(pvec);
    if det.abs() < EPS {
        return None;
    }
    let inv_det = 1.0 / det;
    let tvec = ray.origin - a;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let qvec = tvec.cross(edge1);
    let v = ray.direction.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = edge2.dot(qvec) * inv_det;
    (t >= 0.0).then_some(t)
}

pub fn ray_quad(ray: &Ray, quad: [Vec3; 4]) -> Option<f64> {
    ray_triangle(ray, quad[0], quad[1], quad[2]).or_else(|| ray_triangle(ray, quad[0], quad[2], quad[3]))
}

pub fn ray_rod(ray: &Ray, start: Vec3, end: Vec3, radius: f64) -> Option<f64> {
    let seg = end - start;
    let w0 = ray.origin - start;
    let a = ray.direction.dot(ray.direction);
    let b = ray.direction.dot(seg);
    let c = seg.dot(seg);
    let d = ray.direction.dot(w0);
    let e = seg.dot(w0);
    let denom = a * c - b * b;

    let (t, s) = if denom.abs() < EPS {
        // Parallel: the whole rod is equally close, the near end is hit first.
        let s = if ray.direction.dot(seg) > 0.0 { 0.0 } else { 1.0 };
        let t = (start + seg * s - ray.origin).dot(ray.direction) / a;
        (t, s)
    } else {
        let s = ((a * e - b * d) / denom).clamp(0.0, 1.0);
        let t = (b * s - d) / a;
        (t, s)
    };
    if t < 0.0 {
        return None;
    }
    let closest_ray = ray.at(t);
    let closest_rod = start + seg * s;
    ((closest_ray - closest_rod).magnitude() <= radius).then_some(t)
}
