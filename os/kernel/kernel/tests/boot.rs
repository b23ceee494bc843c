use core::cell::RefCell;
use kernel::{BootConfig, boot};
use kernel_dispi::{DisplayMode, test_pattern_pixel};
use kernel_pci::sim::{SimBus, SimFunction};
use kernel_pci::{MmioMapper, PciAddress};

/// Backs every mapping with a fresh zeroed host buffer.
#[derive(Default)]
struct HostMapper {
    regions: RefCell<Vec<(u64, Box<[u32]>)>>,
}

impl HostMapper {
    fn read_u32(&self, phys: u64, offset: usize) -> u32 {
        let regions = self.regions.borrow();
        let (_, buf) = regions.iter().find(|(p, _)| *p == phys).expect("mapped");
        buf[offset / 4]
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

fn machine() -> SimBus {
    let mut sim = SimBus::new();
    sim.insert(PciAddress::new(0, 0, 0), SimFunction::new(0x8086, 0x29C0).with_class(0x06, 0x00, 0x00))
        .insert(PciAddress::new(0, 1, 0), SimFunction::new(0x1b36, 0x0001).bridge(0, 1))
        .insert(
            PciAddress::new(0, 3, 0),
            SimFunction::new(0x1b36, 0x0002)
                .with_class(0x07, 0x00, 0x02)
                .with_mem_bar(0, 0x1000, false),
        )
        .insert(
            PciAddress::new(1, 0, 0),
            SimFunction::new(0x1234, 0x1111)
                .with_class(0x03, 0x00, 0x00)
                .with_mem_bar(0, 4 << 20, true)
                .with_mem_bar(2, 0x1000, false),
        );
    sim
}

#[test]
fn boot_brings_up_serial_and_display() {
    let mapper = HostMapper::default();
    let summary = boot(machine(), &mapper, &BootConfig::default()).unwrap();

    assert_eq!(summary.pci.devices, 4);
    assert_eq!(summary.pci.bars_unassigned, 0);
    assert_eq!(summary.serial_ports, 1);
    assert!(summary.console.is_some_and(|c| c.registers().is_mmio()));
    assert_eq!(summary.displays, 1);
    assert_eq!(summary.displays_configured, 1);
}

#[test]
fn boot_paints_the_test_pattern() {
    let mapper = HostMapper::default();
    let config = BootConfig {
        display_mode: DisplayMode::DEFAULT.with_resolution(320, 200),
        ..BootConfig::DEFAULT
    };
    boot(machine(), &mapper, &config).unwrap();

    // Mapping order: serial registers, framebuffer, display registers.
    let fb = mapper.regions.borrow()[1].0;
    assert_eq!(mapper.read_u32(fb, 0), test_pattern_pixel(0, 0, 0));
    assert_eq!(mapper.read_u32(fb, 64 * 4), test_pattern_pixel(0, 64, 0));
    assert_eq!(mapper.read_u32(fb, 199 * 1280 + 319 * 4), test_pattern_pixel(0, 319, 199));
}

#[test]
fn oversized_mode_is_reported_not_fatal() {
    let mapper = HostMapper::default();
    let config = BootConfig {
        display_mode: DisplayMode::DEFAULT.with_resolution(4096, 2048),
        test_pattern: false,
        ..BootConfig::DEFAULT
    };
    let summary = boot(machine(), &mapper, &config).unwrap();
    assert_eq!(summary.displays, 1);
    assert_eq!(summary.displays_configured, 0);
}

#[test]
fn empty_bus_boots_with_nothing_attached() {
    let mapper = HostMapper::default();
    let summary = boot(SimBus::new(), &mapper, &BootConfig::DEFAULT).unwrap();
    assert_eq!(summary.pci.devices, 0);
    assert_eq!(summary.serial_ports, 0);
    assert_eq!(summary.console, None);
    assert_eq!(summary.displays, 0);
    assert!(mapper.regions.borrow().is_empty());
}
