use ndarray::{s, Array2};

/// Make an example image for tests and demos.
///
/// A 100x200 image of zeros with a short line at the top left corner, an
/// isolated source of value 2 at `(50, 30)`, and single pixels at `(50, 0)` and
/// in the bottom right corner.
pub fn example_image() -> Array2<f64> {
    let mut image = Array2::zeros((100, 200));
    image.slice_mut(s![0, 0..10]).fill(1.0);
    image[[50, 30]] = 2.0;
    image[[99, 199]] = 1.0;
    image[[50, 0]] = 1.0;
    image
}
