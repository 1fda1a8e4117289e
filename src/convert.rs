//! Single-buffer conversion
//!
//! Validates options, runs the token stream through a fresh
//! [`TerminalState`] and returns the finished image.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::core::term::{tokenize, TerminalState, Token};
use crate::error::{ConvertError, Result};
use crate::render::GlyphRenderer;

pub const CONSOLE_WIDTH_DEFAULT: u32 = 80;
pub const CONSOLE_WIDTH_MIN: u32 = 40;
pub const CONSOLE_WIDTH_MAX: u32 = 1000;

/// Per-conversion options
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Screen width in cells
    pub width: u32,
    /// Tokenize escape sequences but do not act on them
    pub skip_escapes: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            width: CONSOLE_WIDTH_DEFAULT,
            skip_escapes: false,
        }
    }
}

impl ConvertOptions {
    pub fn validate(&self) -> Result<()> {
        if !(CONSOLE_WIDTH_MIN..=CONSOLE_WIDTH_MAX).contains(&self.width) {
            return Err(ConvertError::InvalidWidth {
                width: self.width,
                min: CONSOLE_WIDTH_MIN,
                max: CONSOLE_WIDTH_MAX,
            });
        }
        Ok(())
    }
}

/// Render a CP862 buffer to an image.
pub fn render_buffer<R: GlyphRenderer + ?Sized>(
    buffer: &[u8],
    options: &ConvertOptions,
    renderer: &mut R,
) -> Result<RgbImage> {
    options.validate()?;

    let mut term = TerminalState::new(options.width, renderer);
    for token in tokenize(buffer) {
        if options.skip_escapes && matches!(token, Token::Escape(_)) {
            continue;
        }
        term.feed(token);
    }

    Ok(term.finalize())
}

/// Read `input`, render it and save the image to `output`.
///
/// The image format follows the output file extension.
pub fn convert_file<R: GlyphRenderer + ?Sized>(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
    renderer: &mut R,
) -> Result<(u32, u32)> {
    tracing::info!("Parsing {}", input.display());
    let buffer = fs::read(input)?;
    let image = render_buffer(&buffer, options, renderer)?;
    image.save(output)?;
    tracing::info!("Saved to '{}'", output.display());
    Ok(image.dimensions())
}

/// `<dir>/<stem>.png`, where `dir` is `output_dir` or the input's own directory.
pub fn default_output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let file_name = Path::new(input.file_stem().unwrap_or(input.as_os_str())).with_extension("png");
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingRenderer;
    use crate::render::{Color, CELL_HEIGHT, CELL_WIDTH};

    #[test]
    fn test_end_to_end() {
        let mut renderer = RecordingRenderer::default();
        let image = render_buffer(b"\x80A\x1b[1;37;41m\xdb", &ConvertOptions::default(), &mut renderer).unwrap();

        assert_eq!(image.dimensions(), (80 * CELL_WIDTH, CELL_HEIGHT));
        assert_eq!(renderer.chars(), "אA█");
        assert!(renderer.calls.iter().all(|c| c.row == 0));
        assert_eq!(
            renderer.calls.iter().map(|c| c.col).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );

        let third = &renderer.calls[2].attrs;
        assert!(third.is_bold());
        assert_eq!(third.fg, Color::White);
        assert_eq!(third.bg, Color::Red);
        assert!(!renderer.calls[1].attrs.is_bold());

        assert_eq!(*image.get_pixel(2 * CELL_WIDTH, 0), Color::Red.rgb(false));
    }

    #[test]
    fn test_width_out_of_range_rejected_up_front() {
        for width in [0, 39, 1001] {
            let mut renderer = RecordingRenderer::default();
            let options = ConvertOptions {
                width,
                ..ConvertOptions::default()
            };
            let result = render_buffer(b"hello", &options, &mut renderer);
            assert!(matches!(result, Err(ConvertError::InvalidWidth { .. })));
            assert!(renderer.calls.is_empty());
        }
    }

    #[test]
    fn test_width_bounds_accepted() {
        for width in [CONSOLE_WIDTH_MIN, CONSOLE_WIDTH_MAX] {
            let mut renderer = RecordingRenderer::default();
            let options = ConvertOptions {
                width,
                ..ConvertOptions::default()
            };
            let image = render_buffer(b"", &options, &mut renderer).unwrap();
            assert_eq!(image.dimensions(), (width * CELL_WIDTH, CELL_HEIGHT));
        }
    }

    #[test]
    fn test_wrapped_line_height() {
        let mut renderer = RecordingRenderer::default();
        let options = ConvertOptions {
            width: 40,
            ..ConvertOptions::default()
        };
        let mut input = vec![0xC4; 40];
        input.extend_from_slice(b"\r\nend\r\n");
        let image = render_buffer(&input, &options, &mut renderer).unwrap();
        assert_eq!(image.height(), 2 * CELL_HEIGHT);
    }

    #[test]
    fn test_skip_escapes() {
        let mut renderer = RecordingRenderer::default();
        let options = ConvertOptions {
            skip_escapes: true,
            ..ConvertOptions::default()
        };
        render_buffer(b"a\x1b[31m\x1b[5Cb\x1b[2Jc", &options, &mut renderer).unwrap();
        assert_eq!(renderer.chars(), "abc");
        assert!(renderer.calls.iter().all(|c| c.attrs == Default::default()));
        assert_eq!(
            renderer.calls.iter().map(|c| c.col).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/data/ART.TXT"), None),
            PathBuf::from("/data/ART.png")
        );
        assert_eq!(
            default_output_path(Path::new("/data/ART.TXT"), Some(Path::new("/out"))),
            PathBuf::from("/out/ART.png")
        );
        assert_eq!(
            default_output_path(Path::new("README"), None),
            PathBuf::from("README.png")
        );
    }

    #[test]
    fn test_convert_file_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("menu.txt");
        let output = dir.path().join("menu.png");
        fs::write(&input, b"\xc9\xcd\xbb\r\n\xba\x80\xba\r\n\xc8\xcd\xbc\r\n").unwrap();

        let mut renderer = RecordingRenderer::default();
        let dims = convert_file(&input, &output, &ConvertOptions::default(), &mut renderer).unwrap();
        assert_eq!(dims, (80 * CELL_WIDTH, 3 * CELL_HEIGHT));

        let saved = image::open(&output).unwrap().to_rgb8();
        assert_eq!(saved.dimensions(), dims);
    }

    #[test]
    fn test_convert_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = RecordingRenderer::default();
        let result = convert_file(
            &dir.path().join("absent.txt"),
            &dir.path().join("absent.png"),
            &ConvertOptions::default(),
            &mut renderer,
        );
        assert!(matches!(result, Err(ConvertError::Io(_))));
    }
}
