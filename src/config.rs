//! Panel configuration
//!
//! Everything the bring-up sequence needs to know about the attached TFT panel:
//! resolution, sync timing, clock setup and backlight PWM. The values are fixed
//! once the driver is built; there is no reconfiguration after `init`.

use crate::flag::Flag;

/// Address mode written with `SET_ADDRESS_MODE` (0x36)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Flipped vertically and horizontally, the usual mounting of 4.3" modules
    #[default]
    Normal,
    /// Controller default scan direction
    Flipped,
}

impl Orientation {
    /// Parameter byte for `SET_ADDRESS_MODE`
    pub const fn address_mode(self) -> u8 {
        match self {
            Orientation::Normal => Flag::ADDRESS_MODE_FLIP_VERTICAL,
            Orientation::Flipped => Flag::ADDRESS_MODE_DEFAULT,
        }
    }
}

/// PLL parameters for `SET_PLL_MN` (0xE2)
///
/// With a 10 MHz reference the defaults give VCO = 10 MHz * (0x23 + 1) = 360 MHz
/// and PLL = VCO / (0x05 + 1) = 60 MHz. The third byte latches the M/N values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PllConfig {
    /// Multiplier N
    pub multiplier: u8,
    /// Divider M
    pub divider: u8,
    /// Effectuate byte
    pub control: u8,
}

/// Backlight PWM parameters for `SET_PWM_CONF` (0xBE)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacklightConfig {
    /// PWMF\[7:0\], PWM base frequency = PLL / (256 * (1 + divisor)) / 256
    pub pwm_divisor: u8,
    /// Duty cycle from 0x00 (off) to 0xFF (255/256 on)
    pub duty: u8,
}

/// Static description of the panel wired to the controller.
///
/// Horizontal and vertical timing use the datasheet names:
/// HT/VT total period, HPS/VPS sync start, HPW/VPW pulse width,
/// LPS horizontal display period start, FPS vertical display period start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    /// Horizontal resolution in pixels
    pub width: u16,
    /// Vertical resolution in pixels
    pub height: u16,
    /// HT, horizontal total period in pixel clocks
    pub h_total: u16,
    /// HPS, horizontal sync pulse start
    pub h_pulse_start: u16,
    /// HPW, horizontal sync pulse width
    pub h_pulse_width: u8,
    /// LPS, horizontal display period start
    pub h_display_start: u16,
    /// VT, vertical total period in lines
    pub v_total: u16,
    /// VPS, vertical sync pulse start
    pub v_pulse_start: u16,
    /// VPW, vertical sync pulse width
    pub v_pulse_width: u8,
    /// FPS, vertical display period start
    pub v_display_start: u16,
    /// PLL setup
    pub pll: PllConfig,
    /// LSHIFT (pixel clock) frequency divisor, 20 bits used
    pub pixel_clock: u32,
    /// Backlight PWM setup
    pub backlight: BacklightConfig,
    /// Scan direction
    pub orientation: Orientation,
}

impl PanelConfig {
    /// Common 4.3" 480x272 TFT module
    pub const TFT_480X272: Self = Self {
        width: 480,
        height: 272,
        h_total: 531,
        h_pulse_start: 43,
        h_pulse_width: 10,
        h_display_start: 8,
        v_total: 288,
        v_pulse_start: 12,
        v_pulse_width: 10,
        v_display_start: 4,
        pll: PllConfig {
            multiplier: 0x23,
            divider: 0x05,
            control: 0x54,
        },
        pixel_clock: 0x04_93E0,
        backlight: BacklightConfig {
            pwm_divisor: 0x02,
            duty: 0x20,
        },
        orientation: Orientation::Normal,
    };

    /// Same panel with a different scan direction
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Same panel with different backlight PWM settings
    pub const fn with_backlight(mut self, backlight: BacklightConfig) -> Self {
        self.backlight = backlight;
        self
    }

    /// Parameters for `SET_PLL_MN`
    pub const fn pll_params(&self) -> [u8; 3] {
        [self.pll.multiplier, self.pll.divider, self.pll.control]
    }

    /// Parameters for `SET_LSHIFT_FREQ`, 24-bit big endian
    pub const fn pixel_clock_params(&self) -> [u8; 3] {
        [
            (self.pixel_clock >> 16) as u8,
            (self.pixel_clock >> 8) as u8,
            self.pixel_clock as u8,
        ]
    }

    /// Parameters for `SET_LCD_MODE`: mode bytes, HDP, VDP, RGB sequence
    pub const fn lcd_mode_params(&self) -> [u8; 7] {
        let [hdp_h, hdp_l] = self.width.saturating_sub(1).to_be_bytes();
        let [vdp_h, vdp_l] = self.height.saturating_sub(1).to_be_bytes();
        [
            Flag::LCD_MODE_24BIT_TFT,
            Flag::LCD_MODE_TFT,
            hdp_h,
            hdp_l,
            vdp_h,
            vdp_l,
            Flag::LCD_MODE_RGB_SEQUENCE,
        ]
    }

    /// Parameters for `SET_HORI_PERIOD`: HT, HPS, HPW, LPS, LPSPP
    pub const fn hori_period_params(&self) -> [u8; 8] {
        let [ht_h, ht_l] = self.h_total.to_be_bytes();
        let [hps_h, hps_l] = self.h_pulse_start.to_be_bytes();
        let [lps_h, lps_l] = self.h_display_start.to_be_bytes();
        [
            ht_h,
            ht_l,
            hps_h,
            hps_l,
            self.h_pulse_width,
            lps_h,
            lps_l,
            Flag::HORI_PERIOD_LPSPP,
        ]
    }

    /// Parameters for `SET_VERT_PERIOD`: VT, VPS, VPW, FPS
    pub const fn vert_period_params(&self) -> [u8; 7] {
        let [vt_h, vt_l] = self.v_total.to_be_bytes();
        let [vps_h, vps_l] = self.v_pulse_start.to_be_bytes();
        let [fps_h, fps_l] = self.v_display_start.to_be_bytes();
        [
            vt_h,
            vt_l,
            vps_h,
            vps_l,
            self.v_pulse_width,
            fps_h,
            fps_l,
        ]
    }

    /// Parameters for `SET_PWM_CONF`
    pub const fn pwm_params(&self) -> [u8; 6] {
        [
            self.backlight.pwm_divisor,
            self.backlight.duty,
            Flag::PWM_ENABLE_HOST,
            Flag::PWM_DBC_MANUAL,
            Flag::PWM_DBC_BRIGHTNESS,
            Flag::PWM_DBC_MIN_BRIGHTNESS,
        ]
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::TFT_480X272
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_panel_timing_bytes() {
        let cfg = PanelConfig::default();
        assert_eq!(
            cfg.lcd_mode_params(),
            [0x20, 0x00, 0x01, 0xDF, 0x01, 0x0F, 0x00]
        );
        // HT = 531 = 0x0213, HPS = 43, HPW = 10, LPS = 8
        assert_eq!(
            cfg.hori_period_params(),
            [0x02, 0x13, 0x00, 0x2B, 0x0A, 0x00, 0x08, 0x00]
        );
        // VT = 288 = 0x0120, VPS = 12, VPW = 10, FPS = 4
        assert_eq!(
            cfg.vert_period_params(),
            [0x01, 0x20, 0x00, 0x0C, 0x0A, 0x00, 0x04]
        );
    }

    #[test]
    fn default_clock_and_pwm_bytes() {
        let cfg = PanelConfig::TFT_480X272;
        assert_eq!(cfg.pll_params(), [0x23, 0x05, 0x54]);
        assert_eq!(cfg.pixel_clock_params(), [0x04, 0x93, 0xE0]);
        assert_eq!(cfg.pwm_params(), [0x02, 0x20, 0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn orientation_selects_address_mode() {
        assert_eq!(Orientation::Normal.address_mode(), 0x03);
        assert_eq!(Orientation::Flipped.address_mode(), 0x00);

        let cfg = PanelConfig::TFT_480X272.with_orientation(Orientation::Flipped);
        assert_eq!(cfg.orientation, Orientation::Flipped);
        assert_eq!(cfg.width, 480);
    }
}
