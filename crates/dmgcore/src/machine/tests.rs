use dmgcore_common::{Button, Shade};
use proptest::prelude::*;

use super::{
    AddressSpace, BankingMode, BusEvent, Cartridge, CartridgeKind, DisplaySink, GameBoy, Mode,
    PaletteKind, Pixel, Row, ScanlineEngine, WriterRole, FRAME_CYCLES, LINE_CYCLES,
};
use crate::config::MachineConfig;
use crate::error::CartridgeError;
use crate::io;

#[derive(Default)]
struct RecordingSink {
    rows: Vec<(u8, Row)>,
    palettes: Vec<(PaletteKind, [Shade; 4])>,
}

impl DisplaySink for RecordingSink {
    fn publish_row(&mut self, line: u8, row: &Row) {
        self.rows.push((line, *row));
    }

    fn publish_palette(&mut self, kind: PaletteKind, shades: [Shade; 4]) {
        self.palettes.push((kind, shades));
    }
}

/// ROM image with `banks` 16 KiB banks, each tagged with its bank number
/// at offset 0 of the bank.
fn cartridge_image(banks: usize, cartridge_type: u8, ram_code: u8) -> Vec<u8> {
    let mut rom = vec![0u8; banks * 0x4000];
    for bank in 0..banks {
        rom[bank * 0x4000] = bank as u8;
    }
    rom[0x134..0x134 + 4].copy_from_slice(b"TEST");
    rom[0x147] = cartridge_type;
    rom[0x148] = (banks / 2).trailing_zeros() as u8;
    rom[0x149] = ram_code;
    rom
}

fn bus_with_cartridge(image: &[u8]) -> AddressSpace {
    let mut bus = AddressSpace::default();
    bus.insert_cartridge(Cartridge::from_image(image).unwrap());
    bus
}

/// Engine switched on at line 0 with IF cleared.
fn enabled_engine() -> (ScanlineEngine, AddressSpace, RecordingSink) {
    let mut bus = AddressSpace::default();
    bus.take_events();
    bus.write_byte(io::IF, 0x00, WriterRole::Processor);
    let mut engine = ScanlineEngine::new();
    engine.set_enabled(true, &mut bus);
    (engine, bus, RecordingSink::default())
}

fn colors(row: &Row, range: std::ops::Range<usize>) -> Vec<u8> {
    row[range].iter().map(|px| px.color).collect()
}

/// Machine parked in a `JR -2` loop at 0x0100.
fn spinning_gameboy() -> GameBoy<RecordingSink> {
    let mut gb = GameBoy::with_sink(RecordingSink::default(), MachineConfig::default());
    gb.bus_mut().write_byte(0x0100, 0x18, WriterRole::Loader);
    gb.bus_mut().write_byte(0x0101, 0xFE, WriterRole::Loader);
    gb
}

// Address space

#[test]
fn wram_write_is_visible_in_echo_and_back() {
    let mut bus = AddressSpace::default();
    bus.write_byte(0xC010, 0x42, WriterRole::Processor);
    assert_eq!(bus.read_byte(0xE010), 0x42);

    bus.write_byte(0xE010, 0x99, WriterRole::Processor);
    assert_eq!(bus.read_byte(0xC010), 0x99);
}

proptest! {
    #[test]
    fn echo_mirror_holds_for_every_offset(offset in 0u16..0x1E00, value: u8, via_echo: bool) {
        let mut bus = AddressSpace::default();
        let (dst, mirror) = if via_echo {
            (0xE000 + offset, 0xC000 + offset)
        } else {
            (0xC000 + offset, 0xE000 + offset)
        };
        bus.write_byte(dst, value, WriterRole::Processor);
        prop_assert_eq!(bus.read_byte(mirror), value);
        prop_assert_eq!(bus.read_byte(dst), value);
    }

    #[test]
    fn ly_never_leaves_its_range(chunks in prop::collection::vec(1u32..600, 1..400)) {
        let (mut engine, mut bus, mut sink) = enabled_engine();
        for cycles in chunks {
            engine.advance(cycles, &mut bus, &mut sink);
            let ly = bus.read_byte(io::LY);
            prop_assert!(ly <= 153);
            prop_assert_eq!(ly, engine.line());
        }
    }
}

#[test]
fn p1_accepts_only_the_writers_bits() {
    let mut bus = AddressSpace::default();
    assert_eq!(bus.read_byte(io::P1), 0xCF);

    bus.write_byte(io::P1, 0x00, WriterRole::Processor);
    assert_eq!(bus.read_byte(io::P1), 0xCF);
    bus.write_byte(io::P1, 0xFF, WriterRole::Processor);
    assert_eq!(bus.read_byte(io::P1), 0xFF);

    bus.write_byte(io::P1, 0x00, WriterRole::Input);
    assert_eq!(bus.read_byte(io::P1), 0xF0);

    bus.write_byte(io::P1, 0x00, WriterRole::Display);
    assert_eq!(bus.read_byte(io::P1), 0xF0);
}

#[test]
fn stat_mode_bits_belong_to_the_display() {
    let mut bus = AddressSpace::default();
    assert_eq!(bus.read_byte(io::STAT), 0x80);

    bus.write_byte(io::STAT, 0xFF, WriterRole::Processor);
    assert_eq!(bus.read_byte(io::STAT), 0xFC);

    bus.write_byte(io::STAT, 0x03, WriterRole::Processor);
    assert_eq!(bus.read_byte(io::STAT), 0x80);

    bus.write_byte(io::STAT, 0x03, WriterRole::Display);
    assert_eq!(bus.read_byte(io::STAT), 0x83);
}

#[test]
fn ly_is_read_only_outside_the_display() {
    let mut bus = AddressSpace::default();
    bus.write_byte(io::LY, 0x55, WriterRole::Processor);
    assert_eq!(bus.read_byte(io::LY), 0x00);

    bus.write_byte(io::LY, 0x55, WriterRole::Display);
    assert_eq!(bus.read_byte(io::LY), 0x55);
}

#[test]
fn if_keeps_five_bits_and_reads_upper_bits_set() {
    let mut bus = AddressSpace::default();
    bus.write_byte(io::IF, 0x00, WriterRole::Processor);
    assert_eq!(bus.read_byte(io::IF), 0xE0);
    bus.write_byte(io::IF, 0xFF, WriterRole::Processor);
    assert_eq!(bus.read_byte(io::IF), 0xFF);
    bus.write_byte(io::IF, 0x25, WriterRole::Processor);
    assert_eq!(bus.read_byte(io::IF), 0xE5);
}

#[test]
fn dma_copies_a_page_into_oam() {
    let mut bus = AddressSpace::default();
    for i in 0..0xA0u16 {
        bus.write_byte(0xC100 + i, i as u8 ^ 0x5A, WriterRole::Processor);
    }
    bus.write_byte(io::DMA, 0xC1, WriterRole::Processor);

    for i in 0..0xA0u16 {
        assert_eq!(bus.read_byte(0xFE00 + i), i as u8 ^ 0x5A);
    }
    assert_eq!(bus.read_byte(0xFEA0), 0x00);
}

#[test]
fn palette_writes_queue_decoded_palettes() {
    let mut bus = AddressSpace::default();
    let power_on = bus.take_events();
    assert!(power_on.contains(&BusEvent::Palette(
        PaletteKind::Background,
        Shade::decode_palette(0xFC)
    )));
    assert!(power_on.contains(&BusEvent::LcdEnabled(true)));

    bus.write_byte(io::BGP, 0xE4, WriterRole::Processor);
    bus.write_byte(io::OBP1, 0x1B, WriterRole::Processor);
    assert_eq!(
        bus.take_events(),
        vec![
            BusEvent::Palette(
                PaletteKind::Background,
                [Shade::White, Shade::LightGray, Shade::DarkGray, Shade::Black]
            ),
            BusEvent::Palette(
                PaletteKind::Object1,
                [Shade::Black, Shade::DarkGray, Shade::LightGray, Shade::White]
            ),
        ]
    );
    assert!(bus.take_events().is_empty());
}

#[test]
fn palette_reaches_the_sink_after_a_step() {
    let mut gb = spinning_gameboy();
    assert!(gb
        .sink()
        .palettes
        .contains(&(PaletteKind::Background, Shade::decode_palette(0xFC))));

    gb.bus_mut().write_byte(io::OBP0, 0xE4, WriterRole::Processor);
    gb.step().unwrap();
    assert_eq!(
        gb.sink().palettes.last(),
        Some(&(PaletteKind::Object0, Shade::decode_palette(0xE4)))
    );
}

// Cartridges

#[test]
fn header_fields_are_readable_from_the_address_space() {
    let bus = bus_with_cartridge(&cartridge_image(4, 0x01, 0x00));
    let header = bus.header();
    assert_eq!(header.title, "TEST");
    assert_eq!(header.cartridge_type, 0x01);
    assert_eq!(header.rom_size(), Some(0x10000));
}

#[test]
fn rom_only_cartridge_ignores_control_writes() {
    let mut bus = bus_with_cartridge(&cartridge_image(2, 0x00, 0x00));
    assert_eq!(bus.banking_mode(), None);
    assert_eq!(bus.read_byte(0x4000), 1);

    bus.write_byte(0x2000, 0x00, WriterRole::Processor);
    bus.write_byte(0x0000, 0x77, WriterRole::Processor);
    assert_eq!(bus.read_byte(0x4000), 1);
    assert_eq!(bus.read_byte(0x0000), 0);

    bus.write_byte(0xA000, 0x12, WriterRole::Processor);
    assert_eq!(bus.read_byte(0xA000), 0x12);
}

#[test]
fn mbc1_switches_the_rom_window() {
    let mut bus = bus_with_cartridge(&cartridge_image(4, 0x01, 0x00));
    assert_eq!(bus.read_byte(0x0000), 0);
    assert_eq!(bus.read_byte(0x4000), 1);

    bus.write_byte(0x2000, 0x02, WriterRole::Processor);
    assert_eq!(bus.read_byte(0x4000), 2);
    assert_eq!(bus.rom_bank(), 2);
    bus.write_byte(0x3FFF, 0x03, WriterRole::Processor);
    assert_eq!(bus.read_byte(0x4000), 3);
    assert_eq!(bus.read_byte(0x0000), 0);

    // Bank 0 cannot be selected in the window.
    bus.write_byte(0x2000, 0x00, WriterRole::Processor);
    assert_eq!(bus.read_byte(0x4000), 1);

    // Beyond the real bank count wraps around.
    bus.write_byte(0x2000, 0x05, WriterRole::Processor);
    assert_eq!(bus.read_byte(0x4000), 1);
    bus.write_byte(0x2000, 0x06, WriterRole::Processor);
    assert_eq!(bus.read_byte(0x4000), 2);
}

#[test]
fn mbc1_mode_switch_back_to_16_8_keeps_bank_one() {
    let mut bus = bus_with_cartridge(&cartridge_image(4, 0x01, 0x00));
    bus.write_byte(0x6000, 0x01, WriterRole::Processor);
    assert_eq!(bus.banking_mode(), Some(BankingMode::Rom4Ram32));

    bus.write_byte(0x2000, 0x01, WriterRole::Processor);
    bus.write_byte(0x6000, 0x02, WriterRole::Processor);
    assert_eq!(bus.banking_mode(), Some(BankingMode::Rom16Ram8));
    assert_eq!(bus.read_byte(0x4000), 1);
    assert_eq!(bus.read_byte(0x4001), 0);
}

#[test]
fn mbc1_high_bits_reach_upper_banks() {
    let mut bus = bus_with_cartridge(&cartridge_image(64, 0x01, 0x00));
    bus.write_byte(0x2000, 0x01, WriterRole::Processor);
    bus.write_byte(0x4000, 0x01, WriterRole::Processor);
    assert_eq!(bus.read_byte(0x4000), 0x21);

    // 0x20 with the low bits zero becomes 0x21, never 0x20.
    bus.write_byte(0x2000, 0x00, WriterRole::Processor);
    assert_eq!(bus.read_byte(0x4000), 0x21);
}

#[test]
fn mbc1_control_writes_do_not_touch_memory() {
    let image = cartridge_image(4, 0x01, 0x00);
    let mut bus = bus_with_cartridge(&image);
    bus.write_byte(0x0000, 0x0A, WriterRole::Processor);
    bus.write_byte(0x2100, 0x02, WriterRole::Processor);
    bus.write_byte(0x7000, 0x00, WriterRole::Processor);
    assert_eq!(bus.read_byte(0x0000), image[0x0000]);
    assert_eq!(bus.read_byte(0x2100), image[0x2100]);
    assert_eq!(bus.read_byte(0x7000), image[2 * 0x4000 + 0x3000]);
}

#[test]
fn mbc1_external_ram_needs_enable_latch() {
    let mut bus = bus_with_cartridge(&cartridge_image(2, 0x03, 0x02));
    assert_eq!(bus.read_byte(0xA000), 0xFF);
    bus.write_byte(0xA000, 0x42, WriterRole::Processor);
    assert_eq!(bus.read_byte(0xA000), 0xFF);

    bus.write_byte(0x0000, 0x1A, WriterRole::Processor);
    bus.write_byte(0xA000, 0x42, WriterRole::Processor);
    assert_eq!(bus.read_byte(0xA000), 0x42);

    bus.write_byte(0x0000, 0x00, WriterRole::Processor);
    assert_eq!(bus.read_byte(0xA000), 0xFF);
}

#[test]
fn mbc1_without_ram_chip_keeps_window_open_bus() {
    for (cartridge_type, ram_code) in [(0x01, 0x00), (0x02, 0x00), (0x03, 0x00)] {
        let mut bus = bus_with_cartridge(&cartridge_image(4, cartridge_type, ram_code));
        bus.write_byte(0x0000, 0x0A, WriterRole::Processor);
        bus.write_byte(0xA000, 0x42, WriterRole::Processor);
        bus.write_byte(0xBFFF, 0x24, WriterRole::Processor);
        assert_eq!(bus.read_byte(0xA000), 0xFF);
        assert_eq!(bus.read_byte(0xBFFF), 0xFF);
    }
}

#[test]
fn cartridge_validation_errors() {
    assert_eq!(
        Cartridge::from_image(&[0u8; 0x100]).unwrap_err(),
        CartridgeError::TooShort { len: 0x100 }
    );

    let mut image = cartridge_image(2, 0x00, 0x00);
    image[0x148] = 0x01;
    assert_eq!(
        Cartridge::from_image(&image).unwrap_err(),
        CartridgeError::Truncated {
            declared: 0x10000,
            actual: 0x8000
        }
    );

    image[0x148] = 0x0C;
    assert_eq!(
        Cartridge::from_image(&image).unwrap_err(),
        CartridgeError::UnsupportedRomSize(0x0C)
    );

    let image = cartridge_image(2, 0x13, 0x00);
    assert_eq!(
        Cartridge::from_image(&image).unwrap_err(),
        CartridgeError::UnsupportedType(0x13)
    );
}

#[test]
fn cartridge_kind_follows_type_byte() {
    let kind = |ty| Cartridge::from_image(&cartridge_image(2, ty, 0x02)).unwrap().kind;
    assert_eq!(kind(0x00), CartridgeKind::RomOnly);
    assert_eq!(kind(0x01), CartridgeKind::Mbc1 { ram: false });
    assert_eq!(kind(0x02), CartridgeKind::Mbc1 { ram: true });
    assert_eq!(kind(0x03), CartridgeKind::Mbc1 { ram: true });
}

#[test]
fn gameboy_load_rom_reports_header_and_errors() {
    let mut gb = GameBoy::new();
    let header = gb.load_rom(&cartridge_image(4, 0x01, 0x00)).unwrap();
    assert_eq!(header.title, "TEST");
    assert_eq!(gb.bus().rom_bank(), 1);

    assert!(matches!(
        gb.load_rom(&[0u8; 16]),
        Err(CartridgeError::TooShort { len: 16 })
    ));
}

// Scanline engine

#[test]
fn one_line_visits_transfer_then_hblank_and_publishes_one_row() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    assert_eq!(engine.mode(), Mode::OamScan);

    let mut modes = vec![bus.read_byte(io::STAT) & 0x03];
    for _ in 0..LINE_CYCLES / 4 {
        engine.advance(4, &mut bus, &mut sink);
        let mode = bus.read_byte(io::STAT) & 0x03;
        if modes.last() != Some(&mode) {
            modes.push(mode);
        }
    }

    assert_eq!(modes, vec![2, 3, 0, 2]);
    assert_eq!(sink.rows.len(), 1);
    assert_eq!(sink.rows[0].0, 0);
    assert_eq!(engine.line(), 1);
    assert_eq!(bus.read_byte(io::LY), 1);
}

#[test]
fn mode_boundaries_land_mid_instruction() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    engine.advance(78, &mut bus, &mut sink);
    assert_eq!(engine.mode(), Mode::OamScan);
    engine.advance(4, &mut bus, &mut sink);
    assert_eq!(engine.mode(), Mode::Transfer);
    assert_eq!(engine.dot(), 82);

    engine.advance(172, &mut bus, &mut sink);
    assert_eq!(engine.mode(), Mode::HBlank);
    assert_eq!(engine.dot(), 254);

    // A single large advance crosses several lines.
    engine.advance(LINE_CYCLES * 3, &mut bus, &mut sink);
    assert_eq!(engine.line(), 3);
    assert_eq!(engine.dot(), 254);
    assert_eq!(sink.rows.len(), 4);
}

#[test]
fn full_frame_takes_70224_cycles() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    let mut elapsed = 0;
    let mut vblanks = 0;
    while elapsed < FRAME_CYCLES {
        let chunk = [4, 8, 12, 16, 20, 24][(elapsed as usize / 4) % 6].min(FRAME_CYCLES - elapsed);
        if engine.advance(chunk, &mut bus, &mut sink) {
            vblanks += 1;
        }
        elapsed += chunk;
    }

    assert_eq!(vblanks, 1);
    assert_eq!(engine.frames(), 1);
    assert_eq!(engine.line(), 0);
    assert_eq!(engine.mode(), Mode::OamScan);
    assert_eq!(engine.dot(), 0);
    let lines: Vec<u8> = sink.rows.iter().map(|(line, _)| *line).collect();
    assert_eq!(lines, (0..144).collect::<Vec<u8>>());
}

#[test]
fn vblank_entry_requests_interrupt_once() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    assert!(!engine.advance(LINE_CYCLES * 144 - 4, &mut bus, &mut sink));
    assert_eq!(bus.read_byte(io::IF) & 0x01, 0);

    assert!(engine.advance(4, &mut bus, &mut sink));
    assert_eq!(engine.line(), 144);
    assert_eq!(engine.mode(), Mode::VBlank);
    assert_eq!(bus.read_byte(io::STAT) & 0x03, 1);
    assert_eq!(bus.read_byte(io::IF) & 0x01, 0x01);

    bus.write_byte(io::IF, 0x00, WriterRole::Processor);
    assert!(!engine.advance(LINE_CYCLES * 9, &mut bus, &mut sink));
    assert_eq!(engine.line(), 153);
    assert_eq!(bus.read_byte(io::IF) & 0x01, 0);
}

#[test]
fn stat_interrupt_on_enabled_mode_entry() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    bus.write_byte(io::STAT, 0x08, WriterRole::Processor);

    engine.advance(251, &mut bus, &mut sink);
    assert_eq!(bus.read_byte(io::IF) & 0x02, 0);
    engine.advance(1, &mut bus, &mut sink);
    assert_eq!(bus.read_byte(io::IF) & 0x02, 0x02);

    // OAM entry is not enabled.
    bus.write_byte(io::IF, 0x00, WriterRole::Processor);
    engine.advance(LINE_CYCLES - 252, &mut bus, &mut sink);
    assert_eq!(engine.mode(), Mode::OamScan);
    assert_eq!(bus.read_byte(io::IF) & 0x02, 0);
}

#[test]
fn lyc_coincidence_sets_flag_and_interrupt() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    bus.write_byte(io::LYC, 2, WriterRole::Processor);
    bus.write_byte(io::STAT, 0x40, WriterRole::Processor);

    engine.advance(LINE_CYCLES, &mut bus, &mut sink);
    assert_eq!(bus.read_byte(io::STAT) & 0x04, 0);
    assert_eq!(bus.read_byte(io::IF) & 0x02, 0);

    engine.advance(LINE_CYCLES, &mut bus, &mut sink);
    assert_eq!(bus.read_byte(io::STAT) & 0x04, 0x04);
    assert_eq!(bus.read_byte(io::IF) & 0x02, 0x02);

    engine.advance(LINE_CYCLES, &mut bus, &mut sink);
    assert_eq!(bus.read_byte(io::STAT) & 0x04, 0);
}

#[test]
fn disabled_engine_holds_line_zero() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    engine.advance(LINE_CYCLES * 10 + 100, &mut bus, &mut sink);
    assert_eq!(engine.line(), 10);

    engine.set_enabled(false, &mut bus);
    assert_eq!(bus.read_byte(io::LY), 0);
    assert_eq!(bus.read_byte(io::STAT) & 0x03, 0);

    let rows = sink.rows.len();
    assert!(!engine.advance(FRAME_CYCLES, &mut bus, &mut sink));
    assert_eq!(engine.line(), 0);
    assert_eq!(sink.rows.len(), rows);

    engine.set_enabled(true, &mut bus);
    assert_eq!(engine.line(), 0);
    assert_eq!(engine.mode(), Mode::OamScan);
    assert_eq!(engine.dot(), 0);
}

// Row composition

/// Writes one 8-pixel tile row (both bitplanes) for `tile` at `row`.
fn put_tile_row(bus: &mut AddressSpace, base: u16, row: u16, lo: u8, hi: u8) {
    bus.write_byte(base + row * 2, lo, WriterRole::Processor);
    bus.write_byte(base + row * 2 + 1, hi, WriterRole::Processor);
}

#[test]
fn background_row_uses_map_and_tile_data() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    put_tile_row(&mut bus, 0x8010, 0, 0xF0, 0xFF);
    bus.write_byte(0x9800, 0x01, WriterRole::Processor);

    engine.advance(252, &mut bus, &mut sink);
    let row = &sink.rows[0].1;
    assert_eq!(colors(row, 0..10), vec![3, 3, 3, 3, 2, 2, 2, 2, 0, 0]);
    assert!(row.iter().all(|px| px.palette == PaletteKind::Background));
}

#[test]
fn background_scroll_wraps_around_the_map() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    put_tile_row(&mut bus, 0x8010, 3, 0xF0, 0xFF);
    bus.write_byte(0x9800 + 32, 0x01, WriterRole::Processor);
    bus.write_byte(io::SCX, 0xFC, WriterRole::Processor);
    bus.write_byte(io::SCY, 11, WriterRole::Processor);

    // Line 0 with SCY=11 samples map row 1, tile row 3.
    engine.advance(252, &mut bus, &mut sink);
    let row = &sink.rows[0].1;
    assert_eq!(colors(row, 0..14), vec![0, 0, 0, 0, 3, 3, 3, 3, 2, 2, 2, 2, 0, 0]);
}

#[test]
fn signed_tile_addressing() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    bus.write_byte(io::LCDC, 0x81, WriterRole::Processor);
    put_tile_row(&mut bus, 0x9000, 0, 0xFF, 0x00);
    put_tile_row(&mut bus, 0x8FF0, 0, 0x00, 0xFF);
    bus.write_byte(0x9801, 0xFF, WriterRole::Processor);

    engine.advance(252, &mut bus, &mut sink);
    let row = &sink.rows[0].1;
    assert_eq!(colors(row, 6..10), vec![1, 1, 2, 2]);
}

#[test]
fn background_disable_renders_color_zero() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    put_tile_row(&mut bus, 0x8000, 0, 0xFF, 0xFF);
    bus.write_byte(io::LCDC, 0x90, WriterRole::Processor);

    engine.advance(252, &mut bus, &mut sink);
    assert!(sink.rows[0].1.iter().all(|px| *px == Pixel::BLANK));
}

#[test]
fn window_overlays_from_wx_minus_seven() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    put_tile_row(&mut bus, 0x8010, 0, 0xF0, 0xFF);
    bus.write_byte(0x9C00, 0x01, WriterRole::Processor);
    bus.write_byte(io::LCDC, 0xF1, WriterRole::Processor);
    bus.write_byte(io::WY, 0, WriterRole::Processor);
    bus.write_byte(io::WX, 87, WriterRole::Processor);

    engine.advance(252, &mut bus, &mut sink);
    let row = &sink.rows[0].1;
    assert_eq!(colors(row, 78..90), vec![0, 0, 3, 3, 3, 3, 2, 2, 2, 2, 0, 0]);
}

#[test]
fn window_waits_for_wy() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    put_tile_row(&mut bus, 0x8010, 0, 0xFF, 0x00);
    bus.write_byte(0x9C00, 0x01, WriterRole::Processor);
    bus.write_byte(io::LCDC, 0xF1, WriterRole::Processor);
    bus.write_byte(io::WY, 2, WriterRole::Processor);
    bus.write_byte(io::WX, 7, WriterRole::Processor);

    engine.advance(LINE_CYCLES * 3, &mut bus, &mut sink);
    assert_eq!(sink.rows[1].1[0].color, 0);
    // First window line is window row 0 even though LY is 2.
    assert_eq!(colors(&sink.rows[2].1, 0..8), vec![1; 8]);
}

/// Places OAM entry `index` and its tile row 0.
fn put_sprite(bus: &mut AddressSpace, index: u16, y: u8, x: u8, tile: u8, attrs: u8) {
    let base = 0xFE00 + index * 4;
    for (offset, value) in [y, x, tile, attrs].into_iter().enumerate() {
        bus.write_byte(base + offset as u16, value, WriterRole::Processor);
    }
}

#[test]
fn sprites_overlay_with_their_palette() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    bus.write_byte(io::LCDC, 0x93, WriterRole::Processor);
    put_tile_row(&mut bus, 0x8020, 0, 0x80, 0x00);
    put_sprite(&mut bus, 0, 16, 18, 2, 0x00);
    put_sprite(&mut bus, 1, 16, 38, 2, 0x10);
    put_sprite(&mut bus, 2, 16, 58, 2, 0x20);

    engine.advance(252, &mut bus, &mut sink);
    let row = &sink.rows[0].1;
    assert_eq!(
        row[10],
        Pixel {
            color: 1,
            palette: PaletteKind::Object0
        }
    );
    assert_eq!(row[11], Pixel::BLANK);
    assert_eq!(row[30].palette, PaletteKind::Object1);
    assert_eq!(row[50], Pixel::BLANK);
    assert_eq!(row[57].palette, PaletteKind::Object0);
}

#[test]
fn sprite_behind_background_shows_only_over_color_zero() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    bus.write_byte(io::LCDC, 0x93, WriterRole::Processor);
    // Background: left half of tile 1 is color 1.
    put_tile_row(&mut bus, 0x8010, 0, 0xF0, 0x00);
    bus.write_byte(0x9800, 0x01, WriterRole::Processor);
    // Sprite: a solid color-3 row.
    put_tile_row(&mut bus, 0x8020, 0, 0xFF, 0xFF);
    put_sprite(&mut bus, 0, 16, 8, 2, 0x80);

    engine.advance(252, &mut bus, &mut sink);
    let row = &sink.rows[0].1;
    assert!(row[0..4].iter().all(|px| px.palette == PaletteKind::Background));
    assert!(row[4..8]
        .iter()
        .all(|px| *px == Pixel { color: 3, palette: PaletteKind::Object0 }));
}

#[test]
fn tall_sprites_and_vertical_flip() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    bus.write_byte(io::LCDC, 0x97, WriterRole::Processor);
    // Tile 4 row 0 is color 1; tile 5 row 7 (row 15 of the pair) is color 2.
    put_tile_row(&mut bus, 0x8040, 0, 0xFF, 0x00);
    put_tile_row(&mut bus, 0x8050, 7, 0x00, 0xFF);
    // Odd tile index is forced even in 8x16 mode.
    put_sprite(&mut bus, 0, 16, 8, 5, 0x00);
    put_sprite(&mut bus, 1, 16, 28, 4, 0x40);

    engine.advance(252, &mut bus, &mut sink);
    let row = &sink.rows[0].1;
    assert_eq!(row[0].color, 1);
    assert_eq!(row[20].color, 2);
}

#[test]
fn offscreen_sprites_are_skipped() {
    let (mut engine, mut bus, mut sink) = enabled_engine();
    bus.write_byte(io::LCDC, 0x93, WriterRole::Processor);
    put_tile_row(&mut bus, 0x8020, 0, 0xFF, 0xFF);
    put_sprite(&mut bus, 0, 0, 8, 2, 0x00);
    put_sprite(&mut bus, 1, 16, 0, 2, 0x00);
    put_sprite(&mut bus, 2, 16, 168, 2, 0x00);

    engine.advance(252, &mut bus, &mut sink);
    assert!(sink.rows[0].1.iter().all(|px| *px == Pixel::BLANK));
}

// Scheduler

#[test]
fn step_feeds_instruction_cycles_to_the_engine() {
    let mut gb = spinning_gameboy();
    assert!(gb.ppu().is_enabled());

    let cycles = gb.step().unwrap();
    assert_eq!(cycles, 12);
    assert_eq!(gb.cycles(), 12);
    assert_eq!(gb.ppu().dot(), 12);

    for _ in 0..37 {
        gb.step().unwrap();
    }
    assert_eq!(gb.cycles(), 456);
    assert_eq!(gb.ppu().line(), 1);
    assert_eq!(gb.sink().rows.len(), 1);
}

#[test]
fn run_until_vblank_stops_on_line_144() {
    let mut gb = spinning_gameboy();
    gb.run_until_vblank().unwrap();

    assert_eq!(gb.ppu().line(), 144);
    assert_eq!(gb.frames(), 1);
    assert!(gb.cycles() >= (LINE_CYCLES * 144) as u64);
    assert!(gb.cycles() < (LINE_CYCLES * 144 + 12) as u64);
    assert!(gb.take_frame_ready());
    assert!(!gb.take_frame_ready());
    assert_eq!(gb.sink().rows.len(), 144);
}

#[test]
fn step_frame_advances_one_frame_of_cycles() {
    let mut gb = spinning_gameboy();
    gb.step_frame().unwrap();
    let first = gb.cycles();
    assert!(first >= FRAME_CYCLES as u64);

    gb.step_frame().unwrap();
    assert!(gb.cycles() - first >= FRAME_CYCLES as u64);
    assert!(gb.cycles() < 2 * FRAME_CYCLES as u64 + 12);
    assert_eq!(gb.frames(), 2);
}

#[test]
fn lcd_toggle_through_lcdc_suspends_and_restarts_engine() {
    let mut gb = spinning_gameboy();
    for _ in 0..1000 {
        gb.step().unwrap();
    }
    assert_ne!(gb.ppu().line(), 0);

    gb.bus_mut().write_byte(io::LCDC, 0x11, WriterRole::Processor);
    gb.step().unwrap();
    assert!(!gb.ppu().is_enabled());
    assert_eq!(gb.bus().read_byte(io::LY), 0);
    assert_eq!(gb.bus().read_byte(io::STAT) & 0x03, 0);

    // With the LCD off a VBlank wait gives up after one frame of cycles.
    let before = gb.cycles();
    gb.run_until_vblank().unwrap();
    assert!(gb.cycles() - before >= FRAME_CYCLES as u64);
    assert_eq!(gb.bus().read_byte(io::LY), 0);

    gb.bus_mut().write_byte(io::LCDC, 0x91, WriterRole::Processor);
    gb.step().unwrap();
    assert!(gb.ppu().is_enabled());
    assert_eq!(gb.ppu().line(), 0);
    assert_eq!(gb.ppu().mode(), Mode::OamScan);
}

#[test]
fn timer_overflow_requests_interrupt() {
    let mut gb = spinning_gameboy();
    let bus = gb.bus_mut();
    bus.write_byte(io::DIV, 0x00, WriterRole::Processor);
    bus.write_byte(io::TMA, 0xAB, WriterRole::Processor);
    bus.write_byte(io::TIMA, 0xFF, WriterRole::Processor);
    bus.write_byte(io::TAC, 0x05, WriterRole::Processor);
    bus.write_byte(io::IF, 0x00, WriterRole::Processor);

    // JR costs 12; the 16-cycle input edge falls during the second one.
    gb.step().unwrap();
    assert_eq!(gb.bus().read_byte(io::IF) & 0x04, 0);
    gb.step().unwrap();
    assert_eq!(gb.bus().read_byte(io::IF) & 0x04, 0x04);
    assert_eq!(gb.bus().read_byte(io::TIMA), 0xAB);
}

#[test]
fn serial_transfer_is_captured() {
    let mut gb = GameBoy::with_sink(RecordingSink::default(), MachineConfig::default());
    let program = [
        0x3E, b'O', // LD A,'O'
        0xE0, 0x01, // LDH (SB),A
        0x3E, 0x81, // LD A,0x81
        0xE0, 0x02, // LDH (SC),A
        0x3E, b'K', 0xE0, 0x01, 0x3E, 0x81, 0xE0, 0x02, //
        0x18, 0xFE, // JR -2
    ];
    for (i, &byte) in program.iter().enumerate() {
        gb.bus_mut()
            .write_byte(0x0100 + i as u16, byte, WriterRole::Loader);
    }
    gb.bus_mut().write_byte(io::IF, 0x00, WriterRole::Processor);

    for _ in 0..10 {
        gb.step().unwrap();
    }
    assert_eq!(gb.serial_output(), b"OK");
    assert_eq!(gb.bus().read_byte(io::IF) & 0x08, 0x08);
    assert_eq!(gb.bus().read_byte(io::SC), 0x7F);
}

#[test]
fn draining_serial_output_starts_a_fresh_buffer() {
    let mut gb = spinning_gameboy();
    for byte in *b"ab" {
        gb.bus_mut().write_byte(io::SB, byte, WriterRole::Processor);
        gb.bus_mut().write_byte(io::SC, 0x81, WriterRole::Processor);
    }
    assert_eq!(gb.take_serial_output(), b"ab");
    assert!(gb.serial_output().is_empty());

    gb.bus_mut().write_byte(io::SB, b'c', WriterRole::Processor);
    gb.bus_mut().write_byte(io::SC, 0x81, WriterRole::Processor);
    gb.step().unwrap();
    assert_eq!(gb.serial_output(), b"c");
}

#[test]
fn joypad_lines_follow_selection_and_presses() {
    let mut gb = spinning_gameboy();
    gb.bus_mut().write_byte(io::IF, 0x00, WriterRole::Processor);
    // Select the action group (bit 5 low).
    gb.bus_mut().write_byte(io::P1, 0x10, WriterRole::Processor);
    gb.step().unwrap();
    assert_eq!(gb.bus().read_byte(io::P1) & 0x0F, 0x0F);

    gb.press(Button::Start);
    assert!(gb.is_pressed(Button::Start));
    assert_eq!(gb.bus().read_byte(io::P1) & 0x0F, 0x07);
    assert_eq!(gb.bus().read_byte(io::IF) & 0x10, 0x10);

    gb.release(Button::Start);
    assert_eq!(gb.bus().read_byte(io::P1) & 0x0F, 0x0F);

    // Unselected group stays invisible until software selects it.
    gb.press(Button::Down);
    assert_eq!(gb.bus().read_byte(io::P1) & 0x0F, 0x0F);
    gb.bus_mut().write_byte(io::P1, 0x20, WriterRole::Processor);
    gb.step().unwrap();
    assert_eq!(gb.bus().read_byte(io::P1) & 0x0F, 0x07);
}

#[test]
fn held_button_does_not_retrigger_interrupt() {
    let mut gb = spinning_gameboy();
    gb.press(Button::A);
    gb.bus_mut().write_byte(io::IF, 0x00, WriterRole::Processor);
    gb.set_button(Button::A, true);
    assert_eq!(gb.bus().read_byte(io::IF) & 0x10, 0);
}

#[test]
fn frame_buffer_sink_sees_rendered_frame() {
    let mut gb = GameBoy::new();
    gb.bus_mut().write_byte(0x0100, 0x18, WriterRole::Loader);
    gb.bus_mut().write_byte(0x0101, 0xFE, WriterRole::Loader);
    // Tile 0 solid color 3; BGP 0xFC maps it to black.
    for row in 0..8 {
        put_tile_row(gb.bus_mut(), 0x8000, row, 0xFF, 0xFF);
    }

    gb.step_frame().unwrap();
    let frame = gb.sink().snapshot();
    assert_eq!(frame.pixel(0, 0), dmgcore_common::Color::BLACK);
    assert_eq!(frame.pixel(159, 143), dmgcore_common::Color::BLACK);
}
