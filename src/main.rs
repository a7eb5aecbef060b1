#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(not(target_os = "none"))]
mod preview;

#[cfg(target_os = "none")]
use {defmt_rtt as _, panic_probe as _};

#[cfg(not(target_os = "none"))]
fn main() {
    preview::run();
}

#[cfg(target_os = "none")]
#[rtic::app(device = rp_pico::hal::pac, peripherals = true, dispatchers = [I2C0_IRQ])]
mod app {
    use border_watch::{ClockState, Palette, WatchFace};
    use display_interface_spi::SPIInterface;
    use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
    use embedded_hal::digital::{InputPin, StatefulOutputPin};
    use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
    use mipidsi::{models::ST7789, options::ColorInversion, Builder};
    use rtic::mutex_prelude::*;
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock},
        fugit::{ExtU32, RateExtU32},
        gpio::{
            bank0::{Gpio15, Gpio16, Gpio17, Gpio18, Gpio19, Gpio20, Gpio21, Gpio25},
            FunctionSio, FunctionSpi, Interrupt, Pin, PullDown, PullUp, SioInput, SioOutput,
        },
        pac,
        sio::Sio,
        spi::{Enabled, Spi},
        timer::{Alarm, Alarm0, Alarm1, Timer},
        watchdog::Watchdog,
    };

    const XTAL_FREQ_HZ: u32 = 12_000_000;
    const SPI_FREQ_HZ: u32 = 62_500_000;
    const PANEL_WIDTH: u16 = 240;
    const PANEL_HEIGHT: u16 = 240;

    const TICK_PERIOD_US: u32 = 1_000_000;
    const REPEAT_START_US: u32 = 500_000;
    const REPEAT_MIN_US: u32 = 20_000;

    type Spi0 = Spi<
        Enabled,
        pac::SPI0,
        (
            Pin<Gpio19, FunctionSpi, PullDown>,
            Pin<Gpio16, FunctionSpi, PullDown>,
            Pin<Gpio18, FunctionSpi, PullDown>,
        ),
    >;
    type PushPull<I> = Pin<I, FunctionSio<SioOutput>, PullDown>;
    type PanelInterface =
        SPIInterface<ExclusiveDevice<Spi0, PushPull<Gpio17>, NoDelay>, PushPull<Gpio20>>;
    type Panel = mipidsi::Display<PanelInterface, ST7789, PushPull<Gpio21>>;

    #[shared]
    struct Shared {
        clock: ClockState,
        face: WatchFace<Rgb565>,
        button: Pin<Gpio15, FunctionSio<SioInput>, PullUp>,
        alarm1: Alarm1,
        repeat_delay: u32,
    }

    #[local]
    struct Local {
        display: Panel,
        led: PushPull<Gpio25>,
        alarm: Alarm0,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let clocks = init_clocks_and_plls(
            XTAL_FREQ_HZ,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut delay = timer;
        let mut alarm = timer.alarm_0().unwrap();
        alarm.schedule(TICK_PERIOD_US.micros()).unwrap();
        alarm.enable_interrupt();

        let mut alarm1 = timer.alarm_1().unwrap();
        alarm1.enable_interrupt();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let led = pins.led.into_push_pull_output();
        let button = pins.gpio15.into_pull_up_input();
        button.set_interrupt_enabled(Interrupt::EdgeLow, true);

        let mosi = pins.gpio19.into_function::<FunctionSpi>();
        let sck = pins.gpio18.into_function::<FunctionSpi>();
        let miso = pins.gpio16.into_function::<FunctionSpi>();
        let cs = pins.gpio17.into_push_pull_output();
        let dc = pins.gpio20.into_push_pull_output();
        let rst = pins.gpio21.into_push_pull_output();

        let spi = Spi::<_, _, _, 8>::new(pac.SPI0, (mosi, miso, sck));
        let spi = spi.init(
            &mut pac.RESETS,
            clocks.peripheral_clock.freq(),
            SPI_FREQ_HZ.Hz(),
            embedded_hal::spi::MODE_0,
        );

        let spi_device = ExclusiveDevice::new_no_delay(spi, cs).unwrap();
        let display = Builder::new(ST7789, SPIInterface::new(spi_device, dc))
            .display_size(PANEL_WIDTH, PANEL_HEIGHT)
            .invert_colors(ColorInversion::Inverted)
            .reset_pin(rst)
            .init(&mut delay)
            .unwrap();

        let mut face = WatchFace::new(Palette::default(), Rgb565::BLACK);
        if let Err(err) = face.layout().validate(&display.bounding_box()) {
            defmt::warn!("layout does not fit the panel: {}", err);
        }

        let clock = ClockState::new(12, 34, 56);
        let now = clock.time();
        face.on_tick(now.hour, now.minute, now.second);
        redraw::spawn().ok();

        defmt::info!("watchface up, panel {=u16}x{=u16}", PANEL_WIDTH, PANEL_HEIGHT);

        (
            Shared {
                clock,
                face,
                button,
                alarm1,
                repeat_delay: REPEAT_START_US,
            },
            Local {
                display,
                led,
                alarm,
            },
            init::Monotonics(),
        )
    }

    // 1 Hz wall clock
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [clock, face], local = [alarm, led])]
    fn timer_tick(ctx: timer_tick::Context) {
        ctx.local.alarm.clear_interrupt();
        ctx.local.alarm.schedule(TICK_PERIOD_US.micros()).unwrap();

        ctx.local.led.toggle().unwrap();

        let dirty = (ctx.shared.clock, ctx.shared.face).lock(|clock, face| {
            clock.tick();
            let now = clock.time();
            face.on_tick(now.hour, now.minute, now.second)
        });
        if dirty {
            redraw::spawn().ok();
        }
    }

    // Set button: first press adds a minute and arms the repeat alarm
    #[task(binds = IO_IRQ_BANK0, priority = 1, shared = [clock, face, button, alarm1, repeat_delay])]
    fn button_press(mut ctx: button_press::Context) {
        // Masked until release so contact bounce cannot re-enter
        ctx.shared.button.lock(|b| {
            b.set_interrupt_enabled(Interrupt::EdgeLow, false);
            b.clear_interrupt(Interrupt::EdgeLow);
        });

        advance_minute(ctx.shared.clock, ctx.shared.face);

        ctx.shared.repeat_delay.lock(|d| *d = REPEAT_START_US);
        ctx.shared.alarm1.lock(|a| {
            a.clear_interrupt();
            a.schedule(REPEAT_START_US.micros()).ok();
        });
    }

    // Auto-repeat while the set button is held, 20% faster each step
    #[task(binds = TIMER_IRQ_1, priority = 1, shared = [clock, face, button, alarm1, repeat_delay])]
    fn button_repeat(mut ctx: button_repeat::Context) {
        ctx.shared.alarm1.lock(|a| a.clear_interrupt());

        let held = ctx.shared.button.lock(|b| b.is_low().unwrap_or(false));
        if !held {
            ctx.shared.button.lock(|b| {
                b.clear_interrupt(Interrupt::EdgeLow);
                b.set_interrupt_enabled(Interrupt::EdgeLow, true);
            });
            return;
        }

        advance_minute(ctx.shared.clock, ctx.shared.face);

        let delay = ctx.shared.repeat_delay.lock(|d| {
            *d = (*d as u64 * 8 / 10).max(REPEAT_MIN_US as u64) as u32;
            *d
        });
        ctx.shared.alarm1.lock(|a| {
            a.schedule(delay.micros()).ok();
        });
    }

    #[task(shared = [face], local = [display])]
    fn redraw(mut ctx: redraw::Context) {
        let display = ctx.local.display;
        ctx.shared.face.lock(|face| {
            if let Err(err) = face.render(display) {
                defmt::warn!("redraw failed: {}", defmt::Debug2Format(&err));
            }
        });
    }

    fn advance_minute(
        mut clock: impl rtic::Mutex<T = ClockState>,
        mut face: impl rtic::Mutex<T = WatchFace<Rgb565>>,
    ) {
        let now = clock.lock(|c| {
            c.add_minute();
            c.time()
        });
        if face.lock(|f| f.on_tick(now.hour, now.minute, now.second)) {
            redraw::spawn().ok();
        }
    }
}
