//! HTML page showing the palettes of each monitor.

use std::io::{self, Write};

use rgb::RGBA8;

use crate::theme::{Role, DERIVED};
use crate::{ClassifiedTheme, Hct, MonitorTheme, RGBColor};

/// Gray with the same tone as `c`.
fn to_gray(c: RGBA8) -> RGBA8 {
    let hct = c.to_hct();
    RGBA8::from_hct(Hct::new(hct.hue, 0., hct.tone))
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// One row of swatches and, below, the same tones in gray.
fn table_of_colors(fh: &mut impl Write, colors: &[(String, RGBA8)],
                   width: u32, comment: &str) -> io::Result<()> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for (title, c) in colors {
        writeln!(fh, "  <td title=\"{}\" style=\"width: {width}px; height: 30px; \
                      background-color: {}\"></td>",
                 escape(title), c.to_hex())?;
    }
    writeln!(fh, "<td rowspan=\"2\" style=\"padding-left: 7px\">\
                  {comment}</td></tr><tr>")?;
    for (_, c) in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 12px; \
                      background-color: {}\"></td>",
                 to_gray(*c).to_hex())?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

fn theme(fh: &mut impl Write, theme: &ClassifiedTheme) -> io::Result<()> {
    for role in Role::ALL {
        let colors: Vec<_> = theme.palette(role).iter()
            .map(|(level, c)| (format!("{} {level}: {}", role.name(), c.to_hex()), c))
            .collect();
        table_of_colors(fh, &colors, 40, role.name())?;
    }
    let derived: Vec<_> = DERIVED.iter()
        .map(|&(name, role, level)| {
            let c = theme.palette(role).tone(level as i64);
            (format!("{name}: {}", c.to_hex()), c)
        })
        .collect();
    table_of_colors(fh, &derived, 80, "Surface, SurfaceVariant, OnSurface, \
                                        OnSurfaceVariant, PrimaryFixed, \
                                        OnPrimaryFixed")
}

/// Write an HTML page with the candidate colors and the tonal palettes
/// of each monitor.  Monitors whose palette cannot be classified show
/// the reason instead.
pub fn write_html(fh: &mut impl Write, monitors: &[MonitorTheme])
                  -> io::Result<()> {
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <meta charset=\"utf-8\">\n\
                  <title>ThemeM0d preview</title>\n\
                  </head>\n\
                  <body>")?;
    for m in monitors {
        writeln!(fh, "<h3>{}</h3>\n<p>{}</p>",
                 escape(&m.monitor), escape(&m.wallpaper))?;
        let candidates: Vec<_> = m.colors.iter()
            .map(|&c| (c.to_hex(), c)).collect();
        table_of_colors(fh, &candidates, 40, "Wallpaper")?;
        match m.theme() {
            Ok(t) => theme(fh, &t)?,
            Err(e) => writeln!(fh, "<p><b>{}</b></p>", escape(&e.to_string()))?,
        }
    }
    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
