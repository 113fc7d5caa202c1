//! Text renderings of a path for hosts that consume strings.

use std::fmt::Write;

use gridway_core::Point;

/// Output shape for [`format_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathFormat {
    /// `x,y|x,y|...`
    #[default]
    Plain,
    /// `array("0"=array("x"=1,"y"=1),"1"=array("x"=2,"y"=2))`
    TcArray,
}

/// Render `path` as text. An empty path is an empty string.
pub fn format_path(path: &[Point], format: PathFormat) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    match format {
        PathFormat::Plain => {
            for (i, p) in path.iter().enumerate() {
                if i > 0 {
                    out.push('|');
                }
                let _ = write!(out, "{},{}", p.x, p.y);
            }
        }
        PathFormat::TcArray => {
            out.push_str("array(");
            for (i, p) in path.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                let _ = write!(out, r#""{i}"=array("x"={},"y"={})"#, p.x, p.y);
            }
            out.push(')');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: [Point; 2] = [Point::new(1, 1), Point::new(2, 2)];

    #[test]
    fn plain() {
        assert_eq!(format_path(&PATH, PathFormat::Plain), "1,1|2,2");
        assert_eq!(format_path(&PATH[..1], PathFormat::Plain), "1,1");
    }

    #[test]
    fn tc_array() {
        assert_eq!(
            format_path(&PATH, PathFormat::TcArray),
            r#"array("0"=array("x"=1,"y"=1),"1"=array("x"=2,"y"=2))"#
        );
    }

    #[test]
    fn empty() {
        assert_eq!(format_path(&[], PathFormat::Plain), "");
        assert_eq!(format_path(&[], PathFormat::TcArray), "");
    }
}
