//! Pan and zoom arithmetic for the cluster diagram.
//!
//! The transform is applied as `scale(s) translate(tx, ty)`, so a content
//! point `p` lands on screen at `s * (p + t)`.

use crate::geometry::{Point, Rect};
use crate::svg::fmt_num;

pub const MIN_SCALE: f64 = 0.25;
pub const MAX_SCALE: f64 = 2.5;
pub const WHEEL_ZOOM_IN: f64 = 1.1;
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
pub const BUTTON_ZOOM: f64 = 1.2;
/// At or below this scale the svg gets the `zoomed-out` class.
pub const ZOOMED_OUT_THRESHOLD: f64 = 0.5;

/// Padding and scale cap for an auto-fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitPreset {
	pub padding: f64,
	pub cap: f64,
}

impl FitPreset {
	pub const INITIAL: FitPreset = FitPreset {
		padding: 60.0,
		cap: 0.9,
	};
	pub const RESIZE: FitPreset = FitPreset {
		padding: 30.0,
		cap: 1.0,
	};
	pub const FULLSCREEN: FitPreset = FitPreset {
		padding: 50.0,
		cap: 1.0,
	};
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
	pub scale: f64,
	pub translate_x: f64,
	pub translate_y: f64,
}

impl Default for ViewportTransform {
	fn default() -> Self {
		Self {
			scale: 1.0,
			translate_x: 0.0,
			translate_y: 0.0,
		}
	}
}

/// Used when there is nothing sensible to fit.
pub const FALLBACK: ViewportTransform = ViewportTransform {
	scale: 0.45,
	translate_x: 250.0,
	translate_y: 230.0,
};

pub fn clamp_scale(scale: f64) -> f64 {
	scale.clamp(MIN_SCALE, MAX_SCALE)
}

impl ViewportTransform {
	pub fn screen_to_content(&self, screen: Point) -> Point {
		Point::new(
			screen.x / self.scale - self.translate_x,
			screen.y / self.scale - self.translate_y,
		)
	}

	pub fn content_to_screen(&self, content: Point) -> Point {
		Point::new(
			self.scale * (content.x + self.translate_x),
			self.scale * (content.y + self.translate_y),
		)
	}

	/// Zoom to `target` (clamped) keeping the content under `pivot` fixed on
	/// screen. Returns false when the clamped scale is unchanged.
	pub fn zoom_at(&mut self, target: f64, pivot: Point) -> bool {
		let scale = clamp_scale(target);
		if scale == self.scale {
			return false;
		}
		let anchor = self.screen_to_content(pivot);
		self.scale = scale;
		self.translate_x = pivot.x / scale - anchor.x;
		self.translate_y = pivot.y / scale - anchor.y;
		true
	}

	/// Apply one wheel notch at `pivot`.
	pub fn wheel(&mut self, delta_y: f64, pivot: Point) -> bool {
		let factor = if delta_y < 0.0 {
			WHEEL_ZOOM_IN
		} else {
			WHEEL_ZOOM_OUT
		};
		self.zoom_at(self.scale * factor, pivot)
	}

	pub fn is_zoomed_out(&self) -> bool {
		self.scale <= ZOOMED_OUT_THRESHOLD
	}

	/// Value for the root group's `transform` attribute.
	pub fn to_svg(&self) -> String {
		format!(
			"scale({}) translate({}, {})",
			fmt_num(self.scale),
			fmt_num(self.translate_x),
			fmt_num(self.translate_y)
		)
	}

	/// Centre `bounds` on a `width x height` surface. Degenerate input gives
	/// [`FALLBACK`].
	pub fn fit(bounds: Option<Rect>, width: f64, height: f64, preset: FitPreset) -> Self {
		let Some(b) = bounds else {
			return FALLBACK;
		};
		let usable = |v: f64| v.is_finite() && v > 0.0;
		if !usable(b.width) || !usable(b.height) || !usable(width) || !usable(height) {
			return FALLBACK;
		}
		let pad = preset.padding * 2.0;
		let scale = clamp_scale(
			(width / (b.width + pad))
				.min(height / (b.height + pad))
				.min(preset.cap),
		);
		Self {
			scale,
			translate_x: (width / scale - b.width) / 2.0 - b.x,
			translate_y: (height / scale - b.height) / 2.0 - b.y,
		}
	}
}

/// Background drag in progress.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

impl PanState {
	pub fn begin(&mut self, screen: Point, transform: &ViewportTransform) {
		self.active = true;
		self.start_x = screen.x;
		self.start_y = screen.y;
		self.transform_start_x = transform.translate_x;
		self.transform_start_y = transform.translate_y;
	}

	/// Move the transform so the drag follows the pointer.
	pub fn update(&self, screen: Point, transform: &mut ViewportTransform) {
		if !self.active {
			return;
		}
		transform.translate_x = self.transform_start_x + (screen.x - self.start_x) / transform.scale;
		transform.translate_y = self.transform_start_y + (screen.y - self.start_y) / transform.scale;
	}

	pub fn end(&mut self) {
		self.active = false;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn wheel_sequences_stay_in_range() {
		let mut t = ViewportTransform::default();
		let pivot = Point::new(320.0, 200.0);
		for i in 0..200 {
			t.wheel(if i % 7 < 5 { -120.0 } else { 3.0 }, pivot);
			assert!((MIN_SCALE..=MAX_SCALE).contains(&t.scale), "{}", t.scale);
		}
		for _ in 0..100 {
			t.wheel(100.0, pivot);
		}
		assert_eq!(t.scale, MIN_SCALE);
		assert!(!t.wheel(100.0, pivot));
	}

	#[test]
	fn zoom_keeps_the_pivot_fixed() {
		let mut t = ViewportTransform {
			scale: 0.8,
			translate_x: 40.0,
			translate_y: -15.0,
		};
		let pivot = Point::new(410.0, 275.0);
		let under = t.screen_to_content(pivot);
		assert!(t.wheel(-1.0, pivot));
		assert!(close(t.scale, 0.88));
		let back = t.content_to_screen(under);
		assert!(close(back.x, pivot.x) && close(back.y, pivot.y));

		assert!(t.zoom_at(t.scale / BUTTON_ZOOM, Point::new(500.0, 350.0)));
		let back = t.content_to_screen(t.screen_to_content(Point::new(500.0, 350.0)));
		assert!(close(back.x, 500.0) && close(back.y, 350.0));
	}

	#[test]
	fn pan_moves_by_delta_over_scale() {
		let mut t = ViewportTransform {
			scale: 0.5,
			translate_x: 10.0,
			translate_y: 20.0,
		};
		let mut pan = PanState::default();
		pan.begin(Point::new(100.0, 100.0), &t);
		pan.update(Point::new(130.0, 80.0), &mut t);
		assert!(close(t.translate_x, 70.0));
		assert!(close(t.translate_y, -20.0));
		pan.end();
		pan.update(Point::new(900.0, 900.0), &mut t);
		assert!(close(t.translate_x, 70.0));
	}

	#[test]
	fn fit_centres_content() {
		let bounds = Rect::new(80.0, 100.0, 800.0, 500.0);
		let t = ViewportTransform::fit(Some(bounds), 1000.0, 700.0, FitPreset::RESIZE);
		assert!(close(t.scale, (1000.0 / 860.0f64).min(700.0 / 560.0).min(1.0)));
		let tl = t.content_to_screen(Point::new(bounds.x, bounds.y));
		let br = t.content_to_screen(Point::new(bounds.right(), bounds.bottom()));
		assert!(close(tl.x, 1000.0 - br.x));
		assert!(close(tl.y, 700.0 - br.y));
	}

	#[test]
	fn fit_respects_cap_and_clamp() {
		let small = Rect::new(0.0, 0.0, 10.0, 10.0);
		assert!(close(
			ViewportTransform::fit(Some(small), 1000.0, 700.0, FitPreset::INITIAL).scale,
			0.9
		));
		let huge = Rect::new(0.0, 0.0, 100_000.0, 100_000.0);
		assert_eq!(
			ViewportTransform::fit(Some(huge), 1000.0, 700.0, FitPreset::FULLSCREEN).scale,
			MIN_SCALE
		);
	}

	#[test]
	fn degenerate_bounds_fall_back() {
		assert_eq!(ViewportTransform::fit(None, 800.0, 600.0, FitPreset::RESIZE), FALLBACK);
		let flat = Rect::new(0.0, 0.0, 0.0, 50.0);
		assert_eq!(ViewportTransform::fit(Some(flat), 800.0, 600.0, FitPreset::RESIZE), FALLBACK);
		let nan = Rect::new(0.0, 0.0, f64::NAN, 50.0);
		assert_eq!(ViewportTransform::fit(Some(nan), 800.0, 600.0, FitPreset::RESIZE), FALLBACK);
	}

	#[test]
	fn svg_transform_string() {
		assert_eq!(FALLBACK.to_svg(), "scale(0.45) translate(250, 230)");
		assert!(FALLBACK.is_zoomed_out());
		assert!(!ViewportTransform::default().is_zoomed_out());
	}
}
