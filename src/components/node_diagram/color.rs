//! Hex/rgb colour shading for node gradients.

fn parse_rgb(color: &str) -> Option<(u32, u32, u32)> {
	if let Some(hex) = color.strip_prefix('#') {
		if hex.len() != 6 || !hex.is_ascii() {
			return None;
		}
		let channel = |i: usize| u32::from_str_radix(&hex[i..i + 2], 16).ok();
		return Some((channel(0)?, channel(2)?, channel(4)?));
	}
	if color.starts_with("rgb") {
		let mut values = color
			.split(|c: char| !c.is_ascii_digit())
			.filter(|part| !part.is_empty())
			.map(|part| part.parse::<u32>().ok());
		return Some((values.next()??, values.next()??, values.next()??));
	}
	None
}

fn scale(color: &str, factor: u32, cap: fn(u32) -> u32) -> String {
	match parse_rgb(color) {
		Some((r, g, b)) => {
			let f = |c: u32| cap(c * factor / 100);
			format!("rgb({}, {}, {})", f(r), f(g), f(b))
		}
		None => color.to_string(),
	}
}

/// Brighten each channel by `percent`, saturating at 255. Unknown formats are
/// returned unchanged.
pub fn lighten(color: &str, percent: u32) -> String {
	scale(color, 100 + percent, |c| c.min(255))
}

/// Darken each channel by `percent`. Unknown formats are returned unchanged.
pub fn darken(color: &str, percent: u32) -> String {
	scale(color, 100u32.saturating_sub(percent), |c| c)
}
