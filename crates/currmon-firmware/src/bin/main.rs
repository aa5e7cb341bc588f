#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_time::{Delay, Timer};
use embedded_graphics::prelude::Point;
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::timer::timg::TimerGroup;
use log::{LevelFilter, error, info};

// Display-LCD panel specific imports
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::spi::master::{Config, Spi};
use mipidsi::interface::SpiInterface;
use mipidsi::{Builder as MipidsiBuilder, models::ILI9342CRgb565};

use currmon_core::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, REFRESH_INTERVAL};
use currmon_core::display_manager::DisplayManager;
use currmon_core::monitor::Monitor;
use currmon_firmware::analog::AnalogInputs;
use currmon_firmware::clock::EmbassyClock;

const DISPLAY_WIDTH: u16 = 320;
const DISPLAY_HEIGHT: u16 = 240;

/// Each page pixel becomes a 4×4 block, centring the 64×48 page on the panel.
const PAGE_SCALE: u32 = 4;
const PAGE_ORIGIN: Point = Point::new(
    (DISPLAY_WIDTH as i32 - DISPLAY_WIDTH_PX as i32 * PAGE_SCALE as i32) / 2,
    (DISPLAY_HEIGHT as i32 - DISPLAY_HEIGHT_PX as i32 * PAGE_SCALE as i32) / 2,
);

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    rtt_target::rtt_init_log!(LevelFilter::Info);

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Embassy initialized!");

    // Configure and initialize the display

    // 1. Configure SPI bus
    let spi_bus = Spi::new(peripherals.SPI2, Config::default())
        .expect("Failed to configure SPI bus")
        .with_sck(peripherals.GPIO36)
        .with_mosi(peripherals.GPIO37);

    // 2. Chip select driven by the SPI device wrapper
    let cs = Output::new(peripherals.GPIO35, Level::High, OutputConfig::default());

    // 3. Wrap the SPI bus as a SPI device (required by embedded-hal traits)
    let spi_device =
        ExclusiveDevice::new_no_delay(spi_bus, cs).expect("Failed to create SPI device");

    // 4. Set up DC (Data/Command) pin
    let dc = Output::new(peripherals.GPIO34, Level::Low, OutputConfig::default());

    // 5. Buffer for SPI batching
    let mut spi_buffer = [0u8; 64];

    // 6. Create display interface
    let di = SpiInterface::new(spi_device, dc, &mut spi_buffer);

    // 7. Build and initialize the display driver
    let display = MipidsiBuilder::new(ILI9342CRgb565, di)
        .display_size(DISPLAY_WIDTH, DISPLAY_HEIGHT)
        .init(&mut Delay)
        .expect("Failed to initialize display");

    info!("Display initialized!");

    let analog = AnalogInputs::new(peripherals.ADC1, peripherals.GPIO8, peripherals.GPIO9);
    let display_manager = DisplayManager::new(display).with_placement(PAGE_ORIGIN, PAGE_SCALE);
    // Calibration::DEFAULT assumes a 5 V, 10-bit front end; a 3.3 V divider
    // needs its own values via `with_calibration`.
    let mut monitor = Monitor::new(analog, EmbassyClock, display_manager);

    if let Err(e) = monitor.init(&mut Delay) {
        error!("Display wipe failed: {}", e);
    }

    info!("Monitoring started");

    loop {
        monitor.cycle();
        Timer::after(REFRESH_INTERVAL).await;
    }
}
