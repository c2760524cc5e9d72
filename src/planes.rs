//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0 in
//! the upper left, and a square-stepped window onto the complex plane
//! described by a ViewState.
use num::Complex;

use error::{invalid, RenderError};
use view::ViewState;

/// The span of both axes at 100% zoom: -2..2.
pub const BASE_SPAN: f64 = 4.0;

/// Describes the width and height of an integral plane that is assumed
/// to start at 0,0 and all values are assumed to be non-negative
/// integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the left-upper corner and right-lower corner of the
/// visible complex plane, treating the real part of each value as the
/// x-component and the imaginary part as the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

/// Describes the x, y of a pixel: x counts columns from the left, y
/// counts rows from the top.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Contains the definitions of two planes: an integral cartesian
/// plane, and the complex cartesian plane as seen through a view.
/// Maps points from one to the other.  Row 0 of the integral plane is
/// the top of the image, so it maps to the largest imaginary value.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// The size of the integral cartesian plane.
    pub integral_plane: IntegralPlane,
    // The complex point under pixel 0,0.
    origin: Complex<f64>,
    // The distance on the complex plane between neighboring pixels.
    // The same on both axes, so pixels stay square.
    step: f64,
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane and the view
    /// that positions it over the complex plane.  The step per pixel
    /// is `4 / width * (100 / zoom)`; with even dimensions the middle
    /// pixel lands exactly on the view's center.
    pub fn new(width: usize, height: usize, view: &ViewState) -> Result<PlaneMapper, RenderError> {
        if width == 0 || height == 0 {
            return Err(invalid(format!(
                "image dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        view.validate()?;

        let step = BASE_SPAN / (width as f64) * (100.0 / view.zoom_percent);
        let origin = Complex::new(
            view.center_x - (width as f64 / 2.0) * step,
            view.center_y + (height as f64 / 2.0) * step,
        );

        let mapper = PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            origin,
            step,
        };

        // A zoom can be positive and finite and still push the step or
        // the far corner past what an f64 can hold.
        let ComplexPlane(ul, lr) = mapper.corners();
        if !(step.is_finite() && step > 0.0)
            || !(ul.re.is_finite() && ul.im.is_finite() && lr.re.is_finite() && lr.im.is_finite())
        {
            return Err(invalid(format!(
                "zoom {}% at center ({}, {}) does not fit a {}x{} frame",
                view.zoom_percent, view.center_x, view.center_y, width, height
            )));
        }
        Ok(mapper)
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.  Always false
    /// for a mapper built by `new()`.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// The width of one pixel on the complex plane.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The complex points under the upper-left and lower-right pixels.
    pub fn corners(&self) -> ComplexPlane {
        ComplexPlane(
            self.origin,
            self.pixel_to_point(&Pixel(self.integral_plane.0 - 1, self.integral_plane.1 - 1)),
        )
    }

    /// Given a pixel on the integral cartesian plane, map that to a
    /// point on the complex cartesian plane.  There's no clamping:
    /// pixels off the edge of the grid map to points off the edge of
    /// the view.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.origin.re + (pixel.0 as f64) * self.step,
            self.origin.im - (pixel.1 as f64) * self.step,
        )
    }

    /// Given a complex number corresponding to a location on the
    /// complex cartesian plane, map that as closely as possible to a
    /// point on the integral cartesian plane, or None if it falls
    /// outside the image.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Option<Pixel> {
        let left = ((point.re - self.origin.re) / self.step).floor();
        let top = ((self.origin.im - point.im) / self.step).floor();
        if !(left >= 0.0 && top >= 0.0)
            || left >= (self.integral_plane.0 as f64)
            || top >= (self.integral_plane.1 as f64)
        {
            return None;
        }
        Some(Pixel(left as usize, top as usize))
    }
}

/// Maps a single pixel without keeping a mapper around.
pub fn map_pixel(
    px: usize,
    py: usize,
    width: usize,
    height: usize,
    view: &ViewState,
) -> Result<Complex<f64>, RenderError> {
    let mapper = PlaneMapper::new(width, height, view)?;
    Ok(mapper.pixel_to_point(&Pixel(px, py)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(center_x: f64, center_y: f64, zoom_percent: f64) -> ViewState {
        ViewState::new(center_x, center_y, zoom_percent, 80).unwrap()
    }

    fn close(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a.re - b.re).abs() < 1e-12 && (a.im - b.im).abs() < 1e-12
    }

    #[test]
    fn planemapper_fails_on_empty_plane() {
        assert!(PlaneMapper::new(0, 4, &ViewState::default()).is_err());
        assert!(PlaneMapper::new(4, 0, &ViewState::default()).is_err());
    }

    #[test]
    fn planemapper_fails_on_bad_view() {
        let mut bad = ViewState::default();
        bad.zoom_percent = 0.0;
        assert!(PlaneMapper::new(4, 4, &bad).is_err());
        bad.zoom_percent = 100.0;
        bad.max_iterations = 0;
        assert!(PlaneMapper::new(4, 4, &bad).is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 4, &ViewState::default()).unwrap();
        assert_eq!(pm.len(), 16);
        assert!(!pm.is_empty());
        assert_eq!(pm.step(), 1.0);
    }

    #[test]
    fn pixel_to_point_on_the_default_view() {
        let pm = PlaneMapper::new(4, 4, &ViewState::default()).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 0)), Complex::new(1.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 3)), Complex::new(-2.0, -1.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 3)), Complex::new(1.0, -1.0));
    }

    #[test]
    fn corners_on_large_planes() {
        let pm = PlaneMapper::new(1000, 1000, &ViewState::default()).unwrap();
        let step = pm.step();
        assert!((step - 0.004).abs() < 1e-15);
        let ComplexPlane(ul, lr) = pm.corners();
        assert!(close(ul, Complex::new(-2.0, 2.0)));
        assert!(close(lr, Complex::new(2.0 - step, -2.0 + step)));
    }

    #[test]
    fn center_pixel_lands_on_the_view_center() {
        let pm = PlaneMapper::new(640, 480, &view(-0.75, 0.1, 350.0)).unwrap();
        assert!(close(pm.pixel_to_point(&Pixel(320, 240)), Complex::new(-0.75, 0.1)));
    }

    #[test]
    fn zooming_in_shrinks_the_step() {
        let base = PlaneMapper::new(100, 100, &view(0.0, 0.0, 100.0)).unwrap();
        let zoomed = PlaneMapper::new(100, 100, &view(0.0, 0.0, 200.0)).unwrap();
        let wide = PlaneMapper::new(100, 100, &view(0.0, 0.0, 50.0)).unwrap();
        assert!((zoomed.step() - base.step() / 2.0).abs() < 1e-15);
        assert!((wide.step() - base.step() * 2.0).abs() < 1e-15);
    }

    #[test]
    fn mapping_is_affine() {
        let pm = PlaneMapper::new(300, 200, &view(0.3, -0.2, 175.0)).unwrap();
        let a = pm.pixel_to_point(&Pixel(10, 20));
        let b = pm.pixel_to_point(&Pixel(11, 20));
        let c = pm.pixel_to_point(&Pixel(10, 21));
        assert!(((b.re - a.re) - pm.step()).abs() < 1e-12);
        assert_eq!(b.im, a.im);
        assert!(((a.im - c.im) - pm.step()).abs() < 1e-12);
        assert_eq!(c.re, a.re);
    }

    #[test]
    fn point_to_pixel_inverts_pixel_to_point() {
        let pm = PlaneMapper::new(640, 640, &ViewState::default()).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(0.001, -0.001)), Some(Pixel(320, 320)));
        assert_eq!(pm.point_to_pixel(&Complex::new(-1.999, 1.999)), Some(Pixel(0, 0)));
        assert_eq!(pm.point_to_pixel(&Complex::new(1.001, 0.999)), Some(Pixel(480, 160)));
        for &p in &[Pixel(0, 0), Pixel(17, 400), Pixel(639, 639)] {
            let point = pm.pixel_to_point(&p);
            // Nudge into the middle of the pixel to stay clear of rounding.
            let nudged = Complex::new(point.re + pm.step() / 2.0, point.im - pm.step() / 2.0);
            assert_eq!(pm.point_to_pixel(&nudged), Some(p));
        }
    }

    #[test]
    fn point_to_pixel_rejects_points_off_the_grid() {
        let pm = PlaneMapper::new(640, 640, &ViewState::default()).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(2.001, 0.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(-2.1, 0.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 2.1)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, -2.001)), None);
    }

    #[test]
    fn map_pixel_matches_the_mapper() {
        let v = view(0.5, 0.5, 400.0);
        let pm = PlaneMapper::new(64, 48, &v).unwrap();
        assert_eq!(map_pixel(7, 9, 64, 48, &v).unwrap(), pm.pixel_to_point(&Pixel(7, 9)));
        assert!(map_pixel(0, 0, 0, 48, &v).is_err());
    }

    #[test]
    fn zoom_that_overflows_the_step_is_rejected() {
        let tiny = ViewState::new(0.0, 0.0, 1e-307, 50).unwrap();
        match PlaneMapper::new(4, 4, &tiny) {
            Err(RenderError::InvalidConfiguration(_)) => {}
            other => panic!("expected InvalidConfiguration, got {:?}", other),
        }
        assert!(map_pixel(0, 0, 4, 4, &tiny).is_err());
    }

    #[test]
    fn center_at_the_edge_of_f64_is_rejected() {
        let far = ViewState::new(::std::f64::MAX, 0.0, 1e-300, 50).unwrap();
        assert!(PlaneMapper::new(1000, 1000, &far).is_err());
    }
}
