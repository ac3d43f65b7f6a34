//! End-to-end checks of the transform invariants.
//!
//! Run with: `cargo test -p imgsketch-core`

use imgsketch_core::buffer::max_value;
use imgsketch_core::{
    PixelBuffer, color_dodge, convolve2d, gaussian_blur, generate_gaussian_kernel, invert, pad,
    rgb_to_gray,
};
use ndarray::{Array2, Array3, s};

/// Deterministic pseudo-random samples in `0..=255` (integers, so float math stays exact).
fn noise(len: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((state >> 33) % 256) as f64
        })
        .collect()
}

fn noisy_rgb(h: usize, w: usize, seed: u64) -> PixelBuffer {
    let mut data = Array3::from_shape_vec((h, w, 3), noise(h * w * 3, seed)).unwrap();
    data[[0, 0, 0]] = 0.0;
    PixelBuffer::Color(data)
}

fn noisy_gray(h: usize, w: usize, seed: u64) -> Array2<f64> {
    Array2::from_shape_vec((h, w), noise(h * w, seed)).unwrap()
}

#[test]
fn test_grayscale_conversion_is_idempotent() {
    for seed in 1..5 {
        let img = noisy_rgb(9, 13, seed);
        let once = rgb_to_gray(&img).unwrap();
        assert_eq!(rgb_to_gray(&once).unwrap(), once);
    }
}

#[test]
fn test_invert_is_involution_for_zero_based_buffers() {
    for seed in 1..5 {
        let img = noisy_rgb(7, 5, seed);
        assert_eq!(invert(&invert(&img)), img);
    }
}

#[test]
fn test_pad_round_trip() {
    let img = noisy_gray(6, 8, 42);
    for w in [0, 1, 3, 10] {
        let padded = pad(img.view(), w);
        assert_eq!(padded.dim(), (6 + 2 * w, 8 + 2 * w));
        assert_eq!(padded.slice(s![w..w + 6, w..w + 8]), img);
    }
}

#[test]
fn test_kernel_max_is_one_and_values_in_unit_interval() {
    for size in 1..=15 {
        for sigma in [0.5, 1.0, 3.0, 10.0] {
            let k = generate_gaussian_kernel(size, sigma, 0.0).unwrap();
            assert_eq!(max_value(&k), 1.0, "size={size} sigma={sigma}");
            assert!(k.iter().all(|&v| v > 0.0 && v <= 1.0));
        }
    }
}

#[test]
fn test_convolution_preserves_shape() {
    let img = noisy_gray(10, 17, 7);
    for size in [3, 5, 6, 21] {
        let kernel = generate_gaussian_kernel(size, 2.0, 0.0).unwrap();
        let out = convolve2d(img.view(), kernel.view()).unwrap();
        assert_eq!(out.dim(), img.dim());
    }
}

#[test]
fn test_known_3x3_kernel() {
    let k = generate_gaussian_kernel(3, 1.0, 0.0).unwrap();
    assert_eq!(k[[1, 1]], 1.0);
    assert_eq!(k, k.t());
    let corner = k[[0, 0]];
    assert_eq!(corner, k[[2, 2]]);
    assert!(corner < k[[0, 1]]);
    assert!(corner < k[[1, 2]]);
}

#[test]
fn test_color_dodge_clamp_scenario() {
    let a = Array2::from_elem((5, 5), 0.9);
    let b = Array2::from_elem((5, 5), 0.9);
    let out = color_dodge(&PixelBuffer::Gray(a.clone()), &PixelBuffer::Gray(b.clone())).unwrap();

    let expected = (&b / &(1.0 - &a + 1e-11)).mapv(|v| if v > 1.0 { 1.0 } else { v });
    let expected = &expected / max_value(&expected) * 255.0;
    assert_eq!(out, PixelBuffer::Gray(expected));
    assert!(out.max_value() <= 255.0);
}

#[test]
fn test_grayscale_weights_on_uniform_rgb() {
    let mut data = Array3::zeros((3, 4, 3));
    for ((_, _, c), v) in data.indexed_iter_mut() {
        *v = [100.0, 150.0, 200.0][c];
    }
    let PixelBuffer::Gray(gray) = rgb_to_gray(&PixelBuffer::Color(data)).unwrap() else {
        panic!("expected gray output");
    };
    let expected = 0.2126 * 100.0 + 0.7152 * 150.0 + 0.0722 * 200.0;
    assert!(gray.iter().all(|&v| (v - expected).abs() < 1e-9));
}

#[test]
fn test_gaussian_blur_on_rgb_stays_in_byte_range() {
    let img = noisy_rgb(12, 10, 3);
    let out = gaussian_blur(&img, 7, 2.0).unwrap();
    assert_eq!(out.shape(), img.shape());
    assert_eq!(out.max_value(), 255.0);
    assert!(out.min_value() >= 0.0);
}
