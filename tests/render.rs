use image::{DynamicImage, Rgb, RgbImage};
use pixtext::{CssMode, Glyph, ImageSize, Pixel, RenderConfig, Renderer, TextStyle};

/// Left half red, right half blue.
fn split_image(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    });
    DynamicImage::ImageRgb8(img)
}

fn renderer(style: TextStyle, mode: CssMode) -> Renderer {
    let config = RenderConfig {
        text: "the quick brown fox jumps over the lazy dog".into(),
        width: 12,
        style,
        css_mode: mode,
        ..Default::default()
    };
    Renderer::new(config).unwrap()
}

#[test]
fn renders_one_cell_per_sampled_pixel() {
    let rendering = renderer(TextStyle::Inverted, CssMode::PerCell).render(&split_image(120, 60)).unwrap();

    let size = rendering.image().size();
    assert_eq!(size, ImageSize::new(12, 6));
    assert_eq!(rendering.layout().len(), size.cell_count());
    assert_eq!(rendering.stylesheet().cell_rules().len(), size.cell_count());
    assert_eq!(rendering.html().lines().count(), 6);
    assert!(rendering.layout().rows().all(|row| row.len() == 12));
}

#[test]
fn cell_colors_follow_the_image() {
    let rendering = renderer(TextStyle::Inverted, CssMode::PerCell).render(&split_image(120, 60)).unwrap();
    let cells = rendering.cells();

    // far left and far right columns are unaffected by filter ringing at the seam
    assert_eq!(cells[0].pixel, Pixel::new(255, 0, 0));
    assert_eq!(cells[11].pixel, Pixel::new(0, 0, 255));
    assert_eq!(cells[11].foreground.to_string(), "rgb(255, 255, 0)");
    assert!(rendering
        .css()
        .contains(".color-11::selection { color: rgb(255, 255, 0); background-color: rgb(0, 0, 255); }"));
}

#[test]
fn text_ends_with_ellipsis() {
    let rendering = renderer(TextStyle::Veiled, CssMode::PerCell).render(&split_image(120, 60)).unwrap();
    let layout = rendering.layout();
    let start = layout.ellipsis().unwrap();

    let tail: String = layout.cells()[start..].iter().map(|c| c.glyph.as_char()).collect();
    assert_eq!(tail.trim_end(), "...");
    assert!(layout.cells()[..start].iter().any(|c| c.glyph == Glyph::Char('q')));
}

#[test]
fn custom_property_document() {
    let rendering = renderer(TextStyle::Inverted, CssMode::CustomProperties).render(&split_image(120, 60)).unwrap();
    let doc = rendering.document();

    assert!(doc.contains("[data-px]::selection { color: var(--inv); background-color: var(--rgb); }"));
    assert!(doc.contains("<span data-px style=\"--rgb:rgb(255, 0, 0);--inv:rgb(0, 255, 255)\">t</span>"));
    assert!(!doc.contains("class=\"color-"));
}

#[test]
fn placeholder_renders_black_grid() {
    let rendering = renderer(TextStyle::Transparent, CssMode::PerCell)
        .render_pixels(pixtext::ImageData::placeholder(5))
        .unwrap();
    assert_eq!(rendering.layout().len(), 25);
    assert!(rendering.cells().iter().all(|c| c.background.to_string() == "rgb(0, 0, 0)"));
    assert!(rendering.cells().iter().all(|c| c.foreground.to_string() == "transparent"));
}
