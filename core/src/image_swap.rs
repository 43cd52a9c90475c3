pub const FADE_DELAY_MS: u32 = 150;
pub const OPACITY_HIDDEN: &str = "0";
pub const OPACITY_VISIBLE: &str = "1";

pub trait DisplayImage {
    fn set_opacity(&mut self, opacity: &str);
    fn set_source(&mut self, src: &str, alt: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSwap {
    pub src: String,
    pub alt: String,
}

impl ImageSwap {
    pub fn new(src: &str, alt: &str) -> Self {
        Self {
            src: src.to_string(),
            alt: alt.to_string(),
        }
    }

    pub fn fade_out<I: DisplayImage>(&self, image: &mut I) {
        image.set_opacity(OPACITY_HIDDEN);
    }

    /// Runs once the fade-out delay has elapsed.
    pub fn complete<I: DisplayImage>(&self, image: &mut I) {
        image.set_source(&self.src, &self.alt);
        image.set_opacity(OPACITY_VISIBLE);
    }
}
