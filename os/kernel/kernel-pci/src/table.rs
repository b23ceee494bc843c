//! # Device table
//!
//! One [`DeviceSummary`] per enumerated function, in discovery order, plus
//! the read-only lookups drivers use to find their hardware. Every accessor
//! is bounds-checked: an index past the end yields `None` or `false`.

use crate::bar::{BAR_COUNT, BarRecord};
use crate::class_code::{self, class, subclass};
use crate::header::HeaderType;
use crate::{PciAddress, TableError};
use alloc::vec::Vec;
use core::slice;

/// Everything the enumerator recorded about one function.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DeviceSummary {
    pub address: PciAddress,
    pub vendor_id: u16,
    pub device_id: u16,
    pub class: u8,
    pub subclass: u8,
    pub prog_if: u8,
    pub revision: u8,
    pub header_type: HeaderType,
    /// Type-0 headers only; zero otherwise.
    pub subsystem_vendor_id: u16,
    pub subsystem_id: u16,
    pub interrupt_line: u8,
    pub interrupt_pin: u8,
    /// Populated for type-0 headers by BAR assignment.
    pub bars: [BarRecord; BAR_COUNT],
}

impl DeviceSummary {
    #[must_use]
    pub const fn is_pci_bridge(&self) -> bool {
        self.class == class::BRIDGE && self.subclass == subclass::BRIDGE_PCI2PCI
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        class_code::describe(self.class, self.subclass, self.prog_if)
    }

    /// BAR record, or `None` for an index past [`BAR_COUNT`] or the upper half
    /// of a 64-bit pair.
    #[must_use]
    pub fn bar(&self, bar: usize) -> Option<&BarRecord> {
        self.bars.get(bar).filter(|r| !r.is_upper_half())
    }
}

/// Field-wise class match; `None` fields match anything.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ClassFilter {
    pub class: Option<u8>,
    pub subclass: Option<u8>,
    pub prog_if: Option<u8>,
    pub revision: Option<u8>,
}

impl ClassFilter {
    /// Matches every device.
    pub const ANY: Self = Self {
        class: None,
        subclass: None,
        prog_if: None,
        revision: None,
    };

    #[must_use]
    pub const fn class(class: u8) -> Self {
        Self {
            class: Some(class),
            ..Self::ANY
        }
    }

    #[must_use]
    pub const fn with_subclass(mut self, subclass: u8) -> Self {
        self.subclass = Some(subclass);
        self
    }

    #[must_use]
    pub const fn with_prog_if(mut self, prog_if: u8) -> Self {
        self.prog_if = Some(prog_if);
        self
    }

    #[must_use]
    pub const fn with_revision(mut self, revision: u8) -> Self {
        self.revision = Some(revision);
        self
    }

    #[must_use]
    pub fn matches(&self, dev: &DeviceSummary) -> bool {
        field_matches(self.class, dev.class)
            && field_matches(self.subclass, dev.subclass)
            && field_matches(self.prog_if, dev.prog_if)
            && field_matches(self.revision, dev.revision)
    }
}

fn field_matches<T: PartialEq>(wanted: Option<T>, actual: T) -> bool {
    wanted.is_none_or(|w| w == actual)
}

/// Bounded, append-only list of enumerated functions.
#[derive(Debug, Clone)]
pub struct DeviceTable {
    devices: Vec<DeviceSummary>,
    capacity: usize,
}

impl DeviceTable {
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            devices: Vec::new(),
            capacity,
        }
    }

    /// # Errors
    /// [`TableError::DeviceTableFull`] once `capacity` entries are stored.
    pub fn push(&mut self, device: DeviceSummary) -> Result<usize, TableError> {
        if self.devices.len() >= self.capacity {
            return Err(TableError::DeviceTableFull {
                capacity: self.capacity,
            });
        }
        self.devices.push(device);
        Ok(self.devices.len() - 1)
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.devices.len() >= self.capacity
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DeviceSummary> {
        self.devices.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, DeviceSummary> {
        self.devices.iter()
    }

    #[must_use]
    pub fn description(&self, index: usize) -> Option<&'static str> {
        self.get(index).map(DeviceSummary::description)
    }

    fn record(&self, index: usize, bar: usize) -> Option<&BarRecord> {
        self.get(index)?.bar(bar)
    }

    /// Raw register value, flags included. 64-bit BARs come back whole.
    #[must_use]
    pub fn bar_get(&self, index: usize, bar: usize) -> Option<u64> {
        self.record(index, bar).map(BarRecord::raw)
    }

    /// Register value with the flag bits cleared.
    #[must_use]
    pub fn bar_get_base(&self, index: usize, bar: usize) -> Option<u64> {
        self.record(index, bar).map(BarRecord::base)
    }

    #[must_use]
    pub fn bar_size(&self, index: usize, bar: usize) -> Option<u64> {
        self.record(index, bar).map(BarRecord::size)
    }

    #[must_use]
    pub fn bar_is_io(&self, index: usize, bar: usize) -> bool {
        self.record(index, bar).is_some_and(BarRecord::is_io)
    }

    #[must_use]
    pub fn bar_is_64(&self, index: usize, bar: usize) -> bool {
        self.record(index, bar).is_some_and(BarRecord::is_64bit)
    }

    #[must_use]
    pub fn bar_is_prefetchable(&self, index: usize, bar: usize) -> bool {
        self.record(index, bar).is_some_and(BarRecord::is_prefetchable)
    }

    /// First index after `after` (or from the start, for `None`) whose ids
    /// match. `None` ids match anything.
    #[must_use]
    pub fn next_by_vendor_device(&self, after: Option<usize>, vendor: Option<u16>, device: Option<u16>) -> Option<usize> {
        self.next_matching(after, |d| field_matches(vendor, d.vendor_id) && field_matches(device, d.device_id))
    }

    /// First index after `after` (or from the start, for `None`) matching
    /// `filter`.
    #[must_use]
    pub fn next_by_class(&self, after: Option<usize>, filter: ClassFilter) -> Option<usize> {
        self.next_matching(after, |d| filter.matches(d))
    }

    /// All `(index, device)` pairs matching `filter`, in table order.
    pub fn iter_by_class(&self, filter: ClassFilter) -> impl Iterator<Item = (usize, &DeviceSummary)> {
        self.devices.iter().enumerate().filter(move |(_, d)| filter.matches(d))
    }

    fn next_matching(&self, after: Option<usize>, pred: impl Fn(&DeviceSummary) -> bool) -> Option<usize> {
        let start = match after {
            Some(i) => i.checked_add(1)?,
            None => 0,
        };
        self.devices
            .get(start..)?
            .iter()
            .position(pred)
            .map(|pos| start + pos)
    }
}

impl<'a> IntoIterator for &'a DeviceTable {
    type Item = &'a DeviceSummary;
    type IntoIter = slice::Iter<'a, DeviceSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(slot: u8, vendor: u16, device: u16, class: u8, subclass: u8) -> DeviceSummary {
        DeviceSummary {
            address: PciAddress::new(0, slot, 0),
            vendor_id: vendor,
            device_id: device,
            class,
            subclass,
            prog_if: 0,
            revision: 0,
            header_type: HeaderType::new(),
            subsystem_vendor_id: 0,
            subsystem_id: 0,
            interrupt_line: 0,
            interrupt_pin: 0,
            bars: [BarRecord::default(); BAR_COUNT],
        }
    }

    fn table() -> DeviceTable {
        let mut t = DeviceTable::new(8);
        t.push(device(0, 0x8086, 0x1237, 0x06, 0x00)).unwrap();
        t.push(device(1, 0x1234, 0x1111, 0x03, 0x00)).unwrap();
        t.push(device(2, 0x8086, 0x100E, 0x02, 0x00)).unwrap();
        t.push(device(3, 0x1234, 0x1111, 0x03, 0x00)).unwrap();
        t
    }

    #[test]
    fn push_stops_at_capacity() {
        let mut t = DeviceTable::new(1);
        assert_eq!(t.push(device(0, 1, 1, 0, 0)), Ok(0));
        assert_eq!(
            t.push(device(1, 1, 1, 0, 0)),
            Err(TableError::DeviceTableFull { capacity: 1 })
        );
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn vendor_device_scan_walks_forward() {
        let t = table();
        assert_eq!(t.next_by_vendor_device(None, Some(0x1234), Some(0x1111)), Some(1));
        assert_eq!(t.next_by_vendor_device(Some(1), Some(0x1234), Some(0x1111)), Some(3));
        assert_eq!(t.next_by_vendor_device(Some(3), Some(0x1234), Some(0x1111)), None);
        assert_eq!(t.next_by_vendor_device(None, Some(0x8086), None), Some(0));
        assert_eq!(t.next_by_vendor_device(Some(0), None, Some(0x100E)), Some(2));
        assert_eq!(t.next_by_vendor_device(Some(usize::MAX), None, None), None);
    }

    #[test]
    fn class_scan_with_wildcards() {
        let t = table();
        assert_eq!(t.next_by_class(None, ClassFilter::class(0x03)), Some(1));
        assert_eq!(t.next_by_class(None, ClassFilter::class(0x02).with_subclass(0)), Some(2));
        assert_eq!(t.next_by_class(None, ClassFilter::class(0x03).with_revision(1)), None);
        assert_eq!(t.next_by_class(Some(2), ClassFilter::ANY), Some(3));
        let displays: Vec<usize> = t.iter_by_class(ClassFilter::class(0x03)).map(|(i, _)| i).collect();
        assert_eq!(displays, [1, 3]);
    }

    #[test]
    fn out_of_range_queries_fail_softly() {
        let t = table();
        assert_eq!(t.bar_get(9999, 0), None);
        assert_eq!(t.bar_get_base(9999, 0), None);
        assert_eq!(t.bar_size(0, 9), None);
        assert_eq!(t.description(9999), None);
        assert!(!t.bar_is_io(9999, 0));
        assert!(!t.bar_is_64(0, 5));
        assert!(!t.bar_is_prefetchable(9999, 9999));
    }

    #[test]
    fn upper_half_is_not_addressable() {
        let mut d = device(0, 1, 1, 0, 0);
        d.bars[0] = BarRecord::assigned(0x0000_0001_C000_000C, 0x4000);
        d.bars[1] = BarRecord::UPPER_HALF;
        let mut t = DeviceTable::new(1);
        t.push(d).unwrap();

        assert_eq!(t.bar_get(0, 0), Some(0x0000_0001_C000_000C));
        assert_eq!(t.bar_get_base(0, 0), Some(0x0000_0001_C000_0000));
        assert!(t.bar_is_64(0, 0));
        assert!(t.bar_is_prefetchable(0, 0));
        assert_eq!(t.bar_get(0, 1), None);
        assert!(!t.bar_is_io(0, 1));
        assert!(!t.bar_is_64(0, 1));
        assert!(!t.bar_is_prefetchable(0, 1));
    }

    #[test]
    fn descriptions_come_from_class_codes() {
        let t = table();
        assert_eq!(t.description(1), Some("Display/VGA/Standard"));
        assert_eq!(t.description(0), Some("Bridge/Host"));
    }
}
