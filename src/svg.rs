//! Small helpers for writing SVG markup as strings.

use std::fmt::Write;

pub const FONT_STACK: &str =
	"system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";

/// Escape special XML characters in text content and attribute values.
pub fn escape_xml(text: &str) -> String {
	text.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#39;")
}

/// Format a coordinate with at most three decimals and no trailing zeros.
pub fn fmt_num(n: f64) -> String {
	if !n.is_finite() {
		return "0".into();
	}
	let rounded = (n * 1000.0).round() / 1000.0;
	if rounded == 0.0 {
		"0".into()
	} else {
		format!("{}", rounded)
	}
}

/// Growable markup buffer with indentation-free element helpers.
#[derive(Default)]
pub struct SvgWriter {
	buf: String,
}

impl SvgWriter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Open `<tag attrs…>`.
	pub fn open(&mut self, tag: &str, attrs: &[(&str, String)]) -> &mut Self {
		self.buf.push('<');
		self.buf.push_str(tag);
		push_attrs(&mut self.buf, attrs);
		self.buf.push_str(">\n");
		self
	}

	pub fn close(&mut self, tag: &str) -> &mut Self {
		let _ = writeln!(self.buf, "</{tag}>");
		self
	}

	/// Self-closing `<tag attrs… />`.
	pub fn empty(&mut self, tag: &str, attrs: &[(&str, String)]) -> &mut Self {
		self.buf.push('<');
		self.buf.push_str(tag);
		push_attrs(&mut self.buf, attrs);
		self.buf.push_str(" />\n");
		self
	}

	/// `<tag attrs…>text</tag>` with the text escaped.
	pub fn text_element(&mut self, tag: &str, attrs: &[(&str, String)], text: &str) -> &mut Self {
		self.buf.push('<');
		self.buf.push_str(tag);
		push_attrs(&mut self.buf, attrs);
		self.buf.push('>');
		self.buf.push_str(&escape_xml(text));
		let _ = writeln!(self.buf, "</{tag}>");
		self
	}

	pub fn finish(self) -> String {
		self.buf
	}
}

fn push_attrs(buf: &mut String, attrs: &[(&str, String)]) {
	for (name, value) in attrs {
		let _ = write!(buf, " {}=\"{}\"", name, escape_xml(value));
	}
}

/// Numeric attribute value.
pub fn num(v: f64) -> String {
	fmt_num(v)
}

/// String attribute value.
pub fn attr(v: impl Into<String>) -> String {
	v.into()
}
