//! SVG drawing primitives for index-on-x, value-on-y charts.

use chrono::{Datelike, NaiveDate};

pub const WIDTH: f64 = 900.0;
pub const PADDING: f64 = 50.0;

/// Maps bar index and value into pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// Y range covers every finite value; a flat or empty range is widened.
    pub fn fit<'a, I>(n: usize, values: I, height: f64) -> Self
    where
        I: IntoIterator<Item = &'a f64>,
    {
        let (mut min, mut max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if !min.is_finite() || !max.is_finite() {
            min = 0.0;
            max = 1.0;
        } else if max - min <= f64::EPSILON {
            min -= 1.0;
            max += 1.0;
        }
        Self {
            n,
            min,
            max,
            width: WIDTH,
            height,
        }
    }

    pub fn plot_width(&self) -> f64 {
        self.width - 2.0 * PADDING
    }

    pub fn plot_height(&self) -> f64 {
        self.height - 2.0 * PADDING
    }

    pub fn x(&self, i: usize) -> f64 {
        if self.n > 1 {
            PADDING + i as f64 * self.plot_width() / (self.n - 1) as f64
        } else {
            PADDING + self.plot_width() / 2.0
        }
    }

    pub fn y(&self, value: f64) -> f64 {
        self.height - PADDING - (value - self.min) * self.plot_height() / (self.max - self.min)
    }

    pub fn slot_width(&self) -> f64 {
        if self.n > 0 {
            self.plot_width() / self.n as f64
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Up,
    Down,
}

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn document(frame: &Frame, body: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">
<rect width="100%" height="100%" fill="white"/>
{body}</svg>
"#,
        w = frame.width,
        h = frame.height,
        body = body
    )
}

pub fn polyline(frame: &Frame, values: &[f64], color: &str, stroke_width: f64, opacity: f64) -> String {
    let points: Vec<String> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| format!("{:.1},{:.1}", frame.x(i), frame.y(v)))
        .collect();
    if points.is_empty() {
        return String::new();
    }
    format!(
        "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-opacity=\"{}\" points=\"{}\"/>\n",
        color,
        stroke_width,
        opacity,
        points.join(" ")
    )
}

pub fn markers(frame: &Frame, points: &[(usize, f64)], color: &str, marker: Marker, size: f64) -> String {
    let half = size / 2.0;
    points
        .iter()
        .filter(|(_, v)| v.is_finite())
        .map(|&(i, v)| {
            let (x, y) = (frame.x(i), frame.y(v));
            let (tip, base) = match marker {
                Marker::Up => (y - half, y + half),
                Marker::Down => (y + half, y - half),
            };
            format!(
                "<polygon class=\"marker\" fill=\"{}\" points=\"{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}\"/>\n",
                color,
                x,
                tip,
                x - half,
                base,
                x + half,
                base
            )
        })
        .collect()
}

/// Bars from the zero line; strictly positive values use `positive`.
pub fn bars(frame: &Frame, values: &[f64], positive: &str, negative: &str) -> String {
    let zero = frame.y(0.0_f64.clamp(frame.min, frame.max));
    let width = frame.slot_width();
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| {
            let y = frame.y(v);
            let color = if v > 0.0 { positive } else { negative };
            format!(
                "<rect class=\"bar\" x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" fill-opacity=\"0.6\"/>\n",
                frame.x(i) - width / 2.0,
                y.min(zero),
                width,
                (y - zero).abs(),
                color
            )
        })
        .collect()
}

pub fn hline(frame: &Frame, value: f64, color: &str, opacity: f64) -> String {
    if value < frame.min || value > frame.max {
        return String::new();
    }
    let y = frame.y(value);
    format!(
        "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-opacity=\"{}\"/>\n",
        PADDING,
        y,
        frame.width - PADDING,
        y,
        color,
        opacity
    )
}

/// Frame, title, y range labels and a date tick on the first day of every other month.
pub fn axes(frame: &Frame, dates: &[NaiveDate], title: &str, y_label: &str, x_label: Option<&str>) -> String {
    let bottom = frame.height - PADDING;
    let right = frame.width - PADDING;
    let mut out = format!(
        "<rect x=\"{p:.1}\" y=\"{p:.1}\" width=\"{pw:.1}\" height=\"{ph:.1}\" fill=\"none\" stroke=\"black\" stroke-opacity=\"0.3\"/>\n",
        p = PADDING,
        pw = frame.plot_width(),
        ph = frame.plot_height()
    );
    out.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"16\">{}</text>\n",
        frame.width / 2.0,
        PADDING / 2.0,
        escape(title)
    ));
    out.push_str(&format!(
        "<text x=\"12\" y=\"{:.1}\" font-size=\"12\" transform=\"rotate(-90 12 {:.1})\" text-anchor=\"middle\">{}</text>\n",
        frame.height / 2.0,
        frame.height / 2.0,
        escape(y_label)
    ));
    for value in [frame.min, frame.max] {
        out.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"end\">{:.2}</text>\n",
            PADDING - 4.0,
            frame.y(value) + 3.0,
            value
        ));
    }
    for (i, date) in dates.iter().enumerate() {
        if date.day() == 1 && date.month0() % 2 == 0 {
            let x = frame.x(i);
            out.push_str(&format!(
                "<line class=\"tick\" x1=\"{x:.1}\" y1=\"{top:.1}\" x2=\"{x:.1}\" y2=\"{bottom:.1}\" stroke=\"black\" stroke-opacity=\"0.1\"/>\n<text x=\"{x:.1}\" y=\"{label:.1}\" font-size=\"10\" text-anchor=\"middle\">{date}</text>\n",
                top = PADDING,
                label = bottom + 14.0,
                date = date.format("%Y-%m")
            ));
        }
    }
    if let Some(label) = x_label {
        out.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">{}</text>\n",
            (PADDING + right) / 2.0,
            frame.height - 8.0,
            escape(label)
        ));
    }
    out
}

pub fn legend(entries: &[(&str, &str)]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, (label, color))| {
            let y = PADDING + 14.0 + i as f64 * 16.0;
            format!(
                "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"12\" height=\"4\" fill=\"{}\"/><text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\">{}</text>\n",
                PADDING + 8.0,
                y - 4.0,
                color,
                PADDING + 26.0,
                y,
                escape(label)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_covers_range() {
        let frame = Frame::fit(3, &[1.0, 5.0, 3.0], 300.0);
        assert_eq!(frame.min, 1.0);
        assert_eq!(frame.max, 5.0);
        assert_eq!(frame.y(1.0), 300.0 - PADDING);
        assert_eq!(frame.y(5.0), PADDING);
    }

    #[test]
    fn fit_flat_range_is_widened() {
        let frame = Frame::fit(2, &[7.0, 7.0], 300.0);
        assert!(frame.max > frame.min);
    }

    #[test]
    fn fit_ignores_nan() {
        let frame = Frame::fit(3, &[f64::NAN, 2.0, 4.0], 300.0);
        assert_eq!((frame.min, frame.max), (2.0, 4.0));
    }

    #[test]
    fn fit_empty_defaults() {
        let frame = Frame::fit(0, &[], 300.0);
        assert_eq!((frame.min, frame.max), (0.0, 1.0));
    }

    #[test]
    fn x_spans_plot_area() {
        let frame = Frame::fit(11, &[0.0, 1.0], 300.0);
        assert_eq!(frame.x(0), PADDING);
        assert!((frame.x(10) - (WIDTH - PADDING)).abs() < 1e-9);
    }

    #[test]
    fn escape_ampersand() {
        assert_eq!(escape("Buy & Hold"), "Buy &amp; Hold");
    }

    #[test]
    fn bars_use_sign_colors() {
        let frame = Frame::fit(3, &[-1.0, 0.0, 1.0], 300.0);
        let svg = bars(&frame, &[-1.0, 0.0, 1.0], "green", "red");
        assert_eq!(svg.matches("fill=\"green\"").count(), 1);
        assert_eq!(svg.matches("fill=\"red\"").count(), 2);
    }

    #[test]
    fn markers_skip_nan() {
        let frame = Frame::fit(3, &[0.0, 1.0], 300.0);
        let svg = markers(&frame, &[(0, 0.5), (1, f64::NAN)], "green", Marker::Up, 10.0);
        assert_eq!(svg.matches("<polygon").count(), 1);
    }

    #[test]
    fn hline_outside_range_is_empty() {
        let frame = Frame::fit(3, &[1.0, 2.0], 300.0);
        assert!(hline(&frame, 0.0, "black", 0.3).is_empty());
        assert!(!hline(&frame, 1.5, "black", 0.3).is_empty());
    }

    #[test]
    fn ticks_every_other_month() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let dates: Vec<NaiveDate> = (0..120).map(|d| start + chrono::Days::new(d)).collect();
        let frame = Frame::fit(dates.len(), &[0.0, 1.0], 300.0);
        let svg = axes(&frame, &dates, "T", "Y", None);
        assert!(svg.contains(">2023-01<"));
        assert!(svg.contains(">2023-03<"));
        assert!(!svg.contains(">2023-02<"));
        assert_eq!(svg.matches("class=\"tick\"").count(), 2);
    }
}
