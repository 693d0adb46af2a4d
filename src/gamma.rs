// sRGB <-> linear lookup tables for the canvas's `linear_blending` mode.
// With it on, the particle layer is accumulated in linear light and composited
// over the page background through these tables, so faint connection lines
// over a dark theme keep their brightness instead of sinking into the page.

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1)
    srgb_to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255), index = (linear * 4095).round()
    linear_to_srgb: [u8; 4096],
}

impl GammaLut {
    /// Build both tables once, when the canvas is created.
    pub fn new() -> Self {
        let mut s2l = [0.0f32; 256];
        for (v, slot) in s2l.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut l2s = [0u8; 4096];
        for (i, slot) in l2s.iter_mut().enumerate() {
            let l = (i as f32) / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { srgb_to_linear: s2l, linear_to_srgb: l2s }
    }

    #[inline]
    pub fn srgb_u8_to_linear(&self, v: u8) -> f32 {
        self.srgb_to_linear[v as usize]
    }

    #[inline]
    pub fn linear_to_srgb_u8(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.linear_to_srgb[idx]
    }

    /// One background channel under a layer pixel. `premul` is the layer's
    /// linear channel already multiplied by its `coverage`.
    #[inline]
    pub fn over(&self, background: u8, premul: f32, coverage: f32) -> u8 {
        let bg = self.srgb_u8_to_linear(background);
        self.linear_to_srgb_u8(bg * (1.0 - coverage) + premul)
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}
