use core::cell::RefCell;
use kernel_dispi::regs::{self, dispi_offset};
use kernel_dispi::{ColorDepth, DisplayError, DisplayMode, Displays, MAX_DISPLAYS, test_pattern_pixel};
use kernel_pci::sim::{SimBus, SimFunction};
use kernel_pci::{MmioMapper, PciAddress, PciBus, PciConfig, header};

/// Backs every mapping with a fresh zeroed host buffer.
#[derive(Default)]
struct HostMapper {
    regions: RefCell<Vec<(u64, Box<[u32]>)>>,
}

impl HostMapper {
    fn region(&self, phys: u64) -> *mut u8 {
        let mut regions = self.regions.borrow_mut();
        let (_, buf) = regions.iter_mut().find(|(p, _)| *p == phys).expect("mapped");
        buf.as_mut_ptr().cast()
    }

    fn read_u8(&self, phys: u64, offset: usize) -> u8 {
        unsafe { self.region(phys).add(offset).read() }
    }

    fn read_u16(&self, phys: u64, offset: usize) -> u16 {
        unsafe { self.region(phys).add(offset).cast::<u16>().read() }
    }

    fn write_u32(&self, phys: u64, offset: usize, value: u32) {
        unsafe { self.region(phys).add(offset).cast::<u32>().write(value) }
    }

    fn read_u32(&self, phys: u64, offset: usize) -> u32 {
        unsafe { self.region(phys).add(offset).cast::<u32>().read() }
    }
}

impl MmioMapper for HostMapper {
    unsafe fn map_mmio(&self, phys: u64, len: usize) -> Option<*mut u8> {
        let mut buf = vec![0u32; len.div_ceil(4)].into_boxed_slice();
        let ptr = buf.as_mut_ptr().cast();
        self.regions.borrow_mut().push((phys, buf));
        Some(ptr)
    }
}

fn standard_vga(framebuffer: u32) -> SimFunction {
    SimFunction::new(0x1234, 0x1111)
        .with_class(0x03, 0x00, 0x00)
        .with_revision(2)
        .with_mem_bar(0, framebuffer, true)
        .with_mem_bar(2, 0x1000, false)
}

fn enumerated(sim: SimBus) -> PciBus<'static, SimBus> {
    let mut bus = PciBus::new(sim, PciConfig::default());
    bus.init().unwrap();
    bus
}

fn dispi(mapper: &HostMapper, mmio: u64, index: usize) -> u16 {
    mapper.read_u16(mmio, dispi_offset(index))
}

#[test]
fn probe_attaches_and_unblanks() {
    let mut sim = SimBus::new();
    sim.insert(PciAddress::new(0, 1, 0), SimFunction::new(0x8086, 0x1237).with_class(0x06, 0x00, 0x00));
    sim.insert(PciAddress::new(0, 2, 0), standard_vga(4 << 20));
    let mut bus = enumerated(sim);
    let mapper = HostMapper::default();

    let displays = Displays::probe(&mut bus, &mapper);
    assert_eq!(displays.display_count(), 1);

    let display = displays.get(0).unwrap();
    assert_eq!(display.device, 1);
    assert_eq!(Some(display.framebuffer_phys()), bus.devices().bar_get_base(1, 0));
    assert_eq!(display.framebuffer_len(), 4 << 20);
    assert_eq!(display.mode(), None);

    let mmio = bus.devices().bar_get_base(1, 2).unwrap();
    assert_eq!(mapper.read_u8(mmio, regs::VGA_ATTRIBUTE), regs::VGA_UNBLANK);

    let cmd = bus.transport().peek(PciAddress::new(0, 2, 0), header::COMMAND) & 0x3;
    assert_eq!(cmd, 0x3);

    assert_eq!(display.framebuffer_endianness(), None);
    mapper.write_u32(mmio, regs::QEMU_EXT_SIZE, 8);
    mapper.write_u32(mmio, regs::QEMU_EXT_ENDIANNESS, regs::ENDIAN_LITTLE);
    assert_eq!(display.framebuffer_endianness(), Some(regs::ENDIAN_LITTLE));
}

#[test]
fn set_mode_programs_dispi_registers() {
    let mut sim = SimBus::new();
    sim.insert(PciAddress::new(0, 2, 0), standard_vga(4 << 20));
    let mut bus = enumerated(sim);
    let mapper = HostMapper::default();
    let mut displays = Displays::probe(&mut bus, &mapper);
    let mmio = bus.devices().bar_get_base(0, 2).unwrap();

    let mode = DisplayMode::DEFAULT
        .with_resolution(800, 600)
        .with_virtual_size(800, 1200)
        .with_offset(0, 16);
    displays.set_mode(0, mode).unwrap();

    assert_eq!(dispi(&mapper, mmio, regs::INDEX_XRES), 800);
    assert_eq!(dispi(&mapper, mmio, regs::INDEX_YRES), 600);
    assert_eq!(dispi(&mapper, mmio, regs::INDEX_BPP), 32);
    assert_eq!(dispi(&mapper, mmio, regs::INDEX_BANK), 0);
    assert_eq!(dispi(&mapper, mmio, regs::INDEX_VIRT_WIDTH), 800);
    assert_eq!(dispi(&mapper, mmio, regs::INDEX_VIRT_HEIGHT), 1200);
    assert_eq!(dispi(&mapper, mmio, regs::INDEX_Y_OFFSET), 16);
    assert_eq!(dispi(&mapper, mmio, regs::INDEX_ENABLE), 0x41);

    displays.set_enable(0, true, true).unwrap();
    assert_eq!(dispi(&mapper, mmio, regs::INDEX_ENABLE), 0xC1);
    displays.set_enable(0, false, false).unwrap();
    assert_eq!(dispi(&mapper, mmio, regs::INDEX_ENABLE), 0x00);
    assert!(!displays.get(0).unwrap().mode().unwrap().enabled);

    displays.set_pos(0, 0, 600).unwrap();
    assert_eq!(dispi(&mapper, mmio, regs::INDEX_X_OFFSET), 0);
    assert_eq!(dispi(&mapper, mmio, regs::INDEX_Y_OFFSET), 600);

    let fb = displays.framebuffer(0).unwrap();
    assert_eq!((fb.width, fb.height, fb.pitch), (800, 600, 3200));
}

#[test]
fn mode_larger_than_framebuffer_is_rejected() {
    let mut sim = SimBus::new();
    sim.insert(PciAddress::new(0, 2, 0), standard_vga(1 << 20));
    let mut bus = enumerated(sim);
    let mapper = HostMapper::default();
    let mut displays = Displays::probe(&mut bus, &mapper);
    let mmio = bus.devices().bar_get_base(0, 2).unwrap();

    assert_eq!(
        displays.set_mode(0, DisplayMode::DEFAULT),
        Err(DisplayError::ModeTooLarge {
            required: 1024 * 768 * 4,
            available: 1 << 20,
        })
    );
    assert_eq!(dispi(&mapper, mmio, regs::INDEX_XRES), 0, "nothing written");
    assert_eq!(
        displays.set_mode(1, DisplayMode::DEFAULT),
        Err(DisplayError::NoSuchDisplay { index: 1 })
    );
    assert_eq!(displays.set_pos(3, 0, 0), Err(DisplayError::NoSuchDisplay { index: 3 }));
}

#[test]
fn viewport_outside_virtual_screen_is_rejected() {
    let mut sim = SimBus::new();
    sim.insert(PciAddress::new(0, 2, 0), standard_vga(0x1_0000));
    let mut bus = enumerated(sim);
    let mapper = HostMapper::default();
    let mut displays = Displays::probe(&mut bus, &mapper);
    let mmio = bus.devices().bar_get_base(0, 2).unwrap();

    // 1024x1 virtual fits 64 KiB, the 1024x768 visible area does not.
    assert_eq!(
        displays.set_mode(0, DisplayMode::DEFAULT.with_virtual_size(1024, 1)),
        Err(DisplayError::ViewportOutOfRange {
            width: 1024,
            height: 768,
            x: 0,
            y: 0,
            virt_width: 1024,
            virt_height: 1,
        })
    );
    assert_eq!(dispi(&mapper, mmio, regs::INDEX_XRES), 0, "nothing written");
    assert_eq!(displays.get(0).unwrap().mode(), None);
    displays.fill_test_pattern(0).unwrap();

    let small = DisplayMode::DEFAULT.with_resolution(64, 32).with_virtual_size(128, 64);
    assert!(displays.set_mode(0, small.with_offset(65, 0)).is_err());
    displays.set_mode(0, small.with_offset(64, 32)).unwrap();
    assert!(matches!(
        displays.set_pos(0, 0, 33),
        Err(DisplayError::ViewportOutOfRange { y: 33, .. })
    ));
    assert_eq!(dispi(&mapper, mmio, regs::INDEX_Y_OFFSET), 32);
    assert_eq!(displays.get(0).unwrap().mode().unwrap().y, 32);
}

#[test]
fn test_pattern_respects_pitch() {
    let mut sim = SimBus::new();
    sim.insert(PciAddress::new(0, 2, 0), standard_vga(1 << 20));
    sim.insert(PciAddress::new(0, 3, 0), standard_vga(1 << 20));
    let mut bus = enumerated(sim);
    let mapper = HostMapper::default();
    let mut displays = Displays::probe(&mut bus, &mapper);
    assert_eq!(displays.display_count(), 2);

    let mode = DisplayMode::DEFAULT.with_resolution(130, 70).with_virtual_size(256, 70);
    displays.set_mode(1, mode).unwrap();
    displays.fill_test_pattern(1).unwrap();

    let fb_phys = displays.get(1).unwrap().framebuffer_phys();
    let pixel = |x: usize, y: usize| mapper.read_u32(fb_phys, y * 1024 + x * 4);
    assert_eq!(pixel(0, 0), test_pattern_pixel(1, 0, 0));
    assert_eq!(pixel(64, 0), test_pattern_pixel(1, 64, 0));
    assert_eq!(pixel(129, 69), test_pattern_pixel(1, 129, 69));
    assert_eq!(pixel(130, 0), 0, "outside the visible width");
    assert_eq!(pixel(0, 70), 0, "below the visible height");
}

#[test]
fn test_pattern_needs_32_bpp() {
    let mut sim = SimBus::new();
    sim.insert(PciAddress::new(0, 2, 0), standard_vga(4 << 20));
    let mut bus = enumerated(sim);
    let mapper = HostMapper::default();
    let mut displays = Displays::probe(&mut bus, &mapper);

    displays
        .set_mode(0, DisplayMode::DEFAULT.with_depth(ColorDepth::Bpp16))
        .unwrap();
    assert_eq!(
        displays.fill_test_pattern(0),
        Err(DisplayError::UnsupportedDepth { bpp: 16 })
    );
}

#[test]
fn at_most_eight_displays() {
    let mut sim = SimBus::new();
    for slot in 0..=u8::try_from(MAX_DISPLAYS).unwrap() {
        sim.insert(PciAddress::new(0, slot, 0), standard_vga(0x10_0000));
    }
    let mut bus = enumerated(sim);
    let mapper = HostMapper::default();
    let displays = Displays::probe(&mut bus, &mapper);

    assert_eq!(displays.display_count(), MAX_DISPLAYS);
    let order: Vec<usize> = displays.iter().map(|d| d.device).collect();
    assert_eq!(order, (0..MAX_DISPLAYS).collect::<Vec<_>>());
}

#[test]
fn missing_register_bar_skips_device() {
    let mut sim = SimBus::new();
    sim.insert(
        PciAddress::new(0, 2, 0),
        SimFunction::new(0x1234, 0x1111).with_class(0x03, 0x00, 0x00).with_mem_bar(0, 1 << 20, true),
    );
    sim.insert(PciAddress::new(0, 3, 0), standard_vga(1 << 20));
    let mut bus = enumerated(sim);
    let mapper = HostMapper::default();
    let displays = Displays::probe(&mut bus, &mapper);

    assert_eq!(displays.display_count(), 1);
    assert_eq!(displays.get(0).unwrap().address, PciAddress::new(0, 3, 0));
}
