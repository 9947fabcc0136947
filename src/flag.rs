//! Fixed parameter bytes sent along with the controller commands

/// Parameter bytes and bit patterns used with the SSD1963 commands.
///
/// Values that depend on the attached panel live in [`crate::config::PanelConfig`],
/// these are fixed by the controller.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Set PLL (0xE0)
    pub const PLL_ENABLE: u8 = 0x01;
    pub const PLL_LOCK: u8 = 0x03; // enable + use PLL output as system clock

    // Set LCD mode (0xB0)
    pub const LCD_MODE_24BIT_TFT: u8 = 0x20; // 24-bit panel, data latch on falling edge
    pub const LCD_MODE_TFT: u8 = 0x00; // TFT mode, hsync/vsync active low
    pub const LCD_MODE_RGB_SEQUENCE: u8 = 0x00; // only used in serial RGB mode

    // Set horizontal period (0xB4), LPSPP
    pub const HORI_PERIOD_LPSPP: u8 = 0x00;

    // Set pixel data interface (0xF0)
    pub const PIXEL_DATA_16BIT_565: u8 = 0x03;

    // Set address mode (0x36)
    pub const ADDRESS_MODE_FLIP_VERTICAL: u8 = 0x03; // flip horizontal + vertical
    pub const ADDRESS_MODE_DEFAULT: u8 = 0x00;

    // Set PWM configuration (0xBE)
    pub const PWM_ENABLE_HOST: u8 = 0x01; // PWM enabled, controlled by host (mcu)
    pub const PWM_DBC_MANUAL: u8 = 0x00; // dynamic backlight off, manual brightness
    pub const PWM_DBC_BRIGHTNESS: u8 = 0x00;
    pub const PWM_DBC_MIN_BRIGHTNESS: u8 = 0x00;
}
