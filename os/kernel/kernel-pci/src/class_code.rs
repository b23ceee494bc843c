//! # Class codes
//!
//! Numeric class / subclass / programming-interface codes from the PCI code
//! and ID assignment tables, and [`describe`], which turns a triple into a
//! short path-like string such as `"Storage/SATA/AHCI"`.
//!
//! Unknown subclasses and programming interfaces fall back to
//! `"<Class>/Unknown"` and `"<Class>/<Subclass>/Unknown"`; an unknown class
//! yields exactly `"Unknown"`.

pub mod class {
    pub const UNCLASSIFIED: u8 = 0x00;
    pub const STORAGE: u8 = 0x01;
    pub const NETWORK: u8 = 0x02;
    pub const DISPLAY: u8 = 0x03;
    pub const MULTIMEDIA: u8 = 0x04;
    pub const MEMORY: u8 = 0x05;
    pub const BRIDGE: u8 = 0x06;
    pub const COMM: u8 = 0x07;
    pub const SYSTEM: u8 = 0x08;
    pub const INPUT: u8 = 0x09;
    pub const DOCKING: u8 = 0x0A;
    pub const PROCESSOR: u8 = 0x0B;
    pub const SERIAL: u8 = 0x0C;
    pub const WIRELESS: u8 = 0x0D;
    pub const INTELLIGENT: u8 = 0x0E;
    pub const SATELLITE: u8 = 0x0F;
    pub const ENCRYPTION: u8 = 0x10;
    pub const DSP: u8 = 0x11;
    pub const ACCELERATOR: u8 = 0x12;
    pub const INSTRUMENTATION: u8 = 0x13;
    pub const COPROCESSOR: u8 = 0x40;
    /// Also what an absent function reads as.
    pub const UNASSIGNED: u8 = 0xFF;
}

pub mod subclass {
    pub const UNCLASSIFIED_OLD: u8 = 0x00;
    pub const UNCLASSIFIED_VGA: u8 = 0x01;

    pub const STORAGE_SCSI: u8 = 0x00;
    pub const STORAGE_IDE: u8 = 0x01;
    pub const STORAGE_FLOPPY: u8 = 0x02;
    pub const STORAGE_IPIBUS: u8 = 0x03;
    pub const STORAGE_RAID: u8 = 0x04;
    pub const STORAGE_ATA: u8 = 0x05;
    pub const STORAGE_SATA: u8 = 0x06;
    pub const STORAGE_SAS: u8 = 0x07;
    pub const STORAGE_NVM: u8 = 0x08;
    pub const STORAGE_MASS: u8 = 0x80;

    pub const NETWORK_ETHERNET: u8 = 0x00;
    pub const NETWORK_TOKENRING: u8 = 0x01;
    pub const NETWORK_FDDI: u8 = 0x02;
    pub const NETWORK_ATM: u8 = 0x03;
    pub const NETWORK_ISDN: u8 = 0x04;
    pub const NETWORK_WFLIP: u8 = 0x05;
    pub const NETWORK_PICMGMC: u8 = 0x06;
    pub const NETWORK_OTHER: u8 = 0x80;

    pub const DISPLAY_VGA: u8 = 0x00;
    pub const DISPLAY_XGA: u8 = 0x01;
    pub const DISPLAY_3D: u8 = 0x02;
    pub const DISPLAY_OTHER: u8 = 0x80;

    pub const MULTIMEDIA_VIDEO: u8 = 0x00;
    pub const MULTIMEDIA_AUDIO: u8 = 0x01;
    pub const MULTIMEDIA_TELEPHONY: u8 = 0x02;
    pub const MULTIMEDIA_OTHER: u8 = 0x80;

    pub const MEMORY_RAM: u8 = 0x00;
    pub const MEMORY_FLASH: u8 = 0x01;
    pub const MEMORY_OTHER: u8 = 0x80;

    pub const BRIDGE_HOST: u8 = 0x00;
    pub const BRIDGE_ISA: u8 = 0x01;
    pub const BRIDGE_EISA: u8 = 0x02;
    pub const BRIDGE_MCA: u8 = 0x03;
    pub const BRIDGE_PCI2PCI: u8 = 0x04;
    pub const BRIDGE_PCMCIA: u8 = 0x05;
    pub const BRIDGE_NUBUS: u8 = 0x06;
    pub const BRIDGE_CARDBUS: u8 = 0x07;
    pub const BRIDGE_RACEWAY: u8 = 0x08;
    pub const BRIDGE_SEMI_TRANSPARENT: u8 = 0x09;
    pub const BRIDGE_INFINIBAND: u8 = 0x0A;
    pub const BRIDGE_OTHER: u8 = 0x80;

    pub const COMM_16X50: u8 = 0x00;
    pub const COMM_PARALLEL: u8 = 0x01;
    pub const COMM_MULTIPORT: u8 = 0x02;
    pub const COMM_MODEM: u8 = 0x03;
    pub const COMM_GPIB: u8 = 0x04;
    pub const COMM_SMARTCARD: u8 = 0x05;
    pub const COMM_OTHER: u8 = 0x80;

    pub const SYSTEM_PIC: u8 = 0x00;
    pub const SYSTEM_DMA: u8 = 0x01;
    pub const SYSTEM_TIMER: u8 = 0x02;
    pub const SYSTEM_RTC: u8 = 0x03;
    pub const SYSTEM_HOTPLUG: u8 = 0x04;
    pub const SYSTEM_SDHOST: u8 = 0x05;
    pub const SYSTEM_OTHER: u8 = 0x80;

    pub const INPUT_KEYBOARD: u8 = 0x00;
    pub const INPUT_DIGITIZER: u8 = 0x01;
    pub const INPUT_MOUSE: u8 = 0x02;
    pub const INPUT_SCANNER: u8 = 0x03;
    pub const INPUT_GAMEPORT: u8 = 0x04;
    pub const INPUT_OTHER: u8 = 0x80;

    pub const DOCKING_GENERIC: u8 = 0x00;
    pub const DOCKING_OTHER: u8 = 0x80;

    pub const PROCESSOR_386: u8 = 0x00;
    pub const PROCESSOR_486: u8 = 0x01;
    pub const PROCESSOR_PENTIUM: u8 = 0x02;
    pub const PROCESSOR_ALPHA: u8 = 0x10;
    pub const PROCESSOR_POWERPC: u8 = 0x20;
    pub const PROCESSOR_MIPS: u8 = 0x30;
    pub const PROCESSOR_COPROCESSOR: u8 = 0x40;

    pub const SERIAL_IEEE1394: u8 = 0x00;
    pub const SERIAL_ACCESS_BUS: u8 = 0x01;
    pub const SERIAL_SSA: u8 = 0x02;
    pub const SERIAL_USB: u8 = 0x03;
    pub const SERIAL_FIBRE_CHANNEL: u8 = 0x04;
    pub const SERIAL_SMBUS: u8 = 0x05;
    pub const SERIAL_INFINIBAND: u8 = 0x06;
    pub const SERIAL_IPMI: u8 = 0x07;
    pub const SERIAL_SERCOS: u8 = 0x08;
    pub const SERIAL_CANBUS: u8 = 0x09;

    pub const WIRELESS_IRDA: u8 = 0x00;
    pub const WIRELESS_IR: u8 = 0x01;
    pub const WIRELESS_RF: u8 = 0x10;
    pub const WIRELESS_BLUETOOTH: u8 = 0x11;
    pub const WIRELESS_BROADBAND: u8 = 0x12;
    pub const WIRELESS_ETHERNET_5GHZ: u8 = 0x20;
    pub const WIRELESS_ETHERNET_2GHZ: u8 = 0x21;
    pub const WIRELESS_OTHER: u8 = 0x80;

    pub const INTELLIGENT_IO: u8 = 0x00;

    pub const SATELLITE_TV: u8 = 0x01;
    pub const SATELLITE_AUDIO: u8 = 0x02;
    pub const SATELLITE_VOICE: u8 = 0x03;
    pub const SATELLITE_DATA: u8 = 0x04;

    pub const ENCRYPTION_NETWORK: u8 = 0x00;
    pub const ENCRYPTION_ENTERTAINMENT: u8 = 0x10;
    pub const ENCRYPTION_OTHER: u8 = 0x80;

    pub const DSP_DPIO: u8 = 0x00;
    pub const DSP_PERF_COUNTERS: u8 = 0x01;
    pub const DSP_COMM_SYNC: u8 = 0x10;
    pub const DSP_MANAGEMENT_CARD: u8 = 0x20;
    pub const DSP_OTHER: u8 = 0x80;
}

pub mod prog_if {
    pub const SATA_VENDOR: u8 = 0x00;
    pub const SATA_AHCI: u8 = 0x01;
    pub const SATA_SERIAL_BUS: u8 = 0x02;

    pub const NVM_NVME: u8 = 0x02;

    pub const VGA_STANDARD: u8 = 0x00;
    pub const VGA_8514: u8 = 0x01;

    pub const PCI2PCI_NORMAL: u8 = 0x00;
    pub const PCI2PCI_SUBTRACTIVE: u8 = 0x01;

    pub const SEMI_TRANSPARENT_PRIMARY: u8 = 0x40;
    pub const SEMI_TRANSPARENT_SECONDARY: u8 = 0x80;

    pub const UART_XT: u8 = 0x00;
    pub const UART_16450: u8 = 0x01;
    pub const UART_16550: u8 = 0x02;
    pub const UART_16650: u8 = 0x03;
    pub const UART_16750: u8 = 0x04;
    pub const UART_16850: u8 = 0x05;
    pub const UART_16950: u8 = 0x06;

    pub const PARALLEL_BASIC: u8 = 0x00;
    pub const PARALLEL_BIDIRECTIONAL: u8 = 0x01;
    pub const PARALLEL_ECP: u8 = 0x02;
    pub const PARALLEL_1284: u8 = 0x03;
    pub const PARALLEL_1284_DEVICE: u8 = 0xFE;

    pub const MODEM_GENERIC: u8 = 0x00;
    pub const MODEM_HAYES_16450: u8 = 0x01;
    pub const MODEM_HAYES_16550: u8 = 0x02;
    pub const MODEM_HAYES_16650: u8 = 0x03;
    pub const MODEM_HAYES_16750: u8 = 0x04;

    pub const PIC_8259: u8 = 0x00;
    pub const PIC_ISA: u8 = 0x01;
    pub const PIC_EISA: u8 = 0x02;
    pub const PIC_IOAPIC: u8 = 0x10;
    pub const PIC_IOXAPIC: u8 = 0x20;

    pub const DMA_8237: u8 = 0x00;
    pub const DMA_ISA: u8 = 0x01;
    pub const DMA_EISA: u8 = 0x02;

    pub const TIMER_8254: u8 = 0x00;
    pub const TIMER_ISA: u8 = 0x01;
    pub const TIMER_EISA: u8 = 0x02;

    pub const RTC_GENERIC: u8 = 0x00;
    pub const RTC_ISA: u8 = 0x01;

    pub const GAMEPORT_GENERIC: u8 = 0x00;
    pub const GAMEPORT_EXTENDED: u8 = 0x10;

    pub const IEEE1394_FIREWIRE: u8 = 0x00;

    pub const USB_UHCI: u8 = 0x00;
    pub const USB_OHCI: u8 = 0x10;
    pub const USB_EHCI: u8 = 0x20;
    pub const USB_XHCI: u8 = 0x30;
    pub const USB_UNSPECIFIED: u8 = 0x80;
    pub const USB_DEVICE: u8 = 0xFE;

    pub const IPMI_SMIC: u8 = 0x00;
    pub const IPMI_KEYBOARD: u8 = 0x01;
    pub const IPMI_BLOCK: u8 = 0x02;

    pub const I2O: u8 = 0x00;
    pub const I2O_FIFO: u8 = 0x01;
}

pub mod vendor {
    pub const AMD: u16 = 0x1022;
    pub const INTEL: u16 = 0x8086;
    pub const ENSONIQ: u16 = 0x1274;
    /// Bochs / QEMU emulated hardware.
    pub const QEMU: u16 = 0x1234;
}

/// Human-readable name of a class / subclass / programming-interface triple.
#[must_use]
#[allow(clippy::too_many_lines, clippy::match_same_arms)]
pub const fn describe(class: u8, subclass: u8, prog_if: u8) -> &'static str {
    use self::{class as c, prog_if as p, subclass as s};

    match class {
        c::UNCLASSIFIED => match subclass {
            s::UNCLASSIFIED_OLD => "Unclassified/Old",
            s::UNCLASSIFIED_VGA => "Unclassified/VGA",
            _ => "Unclassified/Unknown",
        },
        c::STORAGE => match subclass {
            s::STORAGE_SCSI => "Storage/SCSI",
            s::STORAGE_IDE => "Storage/IDE",
            s::STORAGE_FLOPPY => "Storage/Floppy",
            s::STORAGE_IPIBUS => "Storage/IPIBus",
            s::STORAGE_RAID => "Storage/RAID",
            s::STORAGE_ATA => "Storage/ATA",
            s::STORAGE_SATA => match prog_if {
                p::SATA_VENDOR => "Storage/SATA/Vendor Specific",
                p::SATA_AHCI => "Storage/SATA/AHCI",
                p::SATA_SERIAL_BUS => "Storage/SATA/Serial",
                _ => "Storage/SATA/Unknown",
            },
            s::STORAGE_SAS => "Storage/SAS",
            s::STORAGE_NVM => match prog_if {
                p::NVM_NVME => "Storage/NVM/NVMe",
                _ => "Storage/NVM/Unknown",
            },
            s::STORAGE_MASS => "Storage/Mass",
            _ => "Storage/Unknown",
        },
        c::NETWORK => match subclass {
            s::NETWORK_ETHERNET => "Network/Ethernet",
            s::NETWORK_TOKENRING => "Network/TokenRing",
            s::NETWORK_FDDI => "Network/FDDI",
            s::NETWORK_ATM => "Network/ATM",
            s::NETWORK_ISDN => "Network/ISDN",
            s::NETWORK_WFLIP => "Network/WFLIP",
            s::NETWORK_PICMGMC => "Network/PICMGMC",
            s::NETWORK_OTHER => "Network/Other",
            _ => "Network/Unknown",
        },
        c::DISPLAY => match subclass {
            s::DISPLAY_VGA => match prog_if {
                p::VGA_STANDARD => "Display/VGA/Standard",
                p::VGA_8514 => "Display/VGA/8514",
                _ => "Display/VGA/Unknown",
            },
            s::DISPLAY_XGA => "Display/XGA",
            s::DISPLAY_3D => "Display/3D",
            s::DISPLAY_OTHER => "Display/Other",
            _ => "Display/Unknown",
        },
        c::MULTIMEDIA => match subclass {
            s::MULTIMEDIA_VIDEO => "Multimedia/Video",
            s::MULTIMEDIA_AUDIO => "Multimedia/Audio",
            s::MULTIMEDIA_TELEPHONY => "Multimedia/Telephony",
            s::MULTIMEDIA_OTHER => "Multimedia/Other",
            _ => "Multimedia/Unknown",
        },
        c::MEMORY => match subclass {
            s::MEMORY_RAM => "Memory/RAM",
            s::MEMORY_FLASH => "Memory/Flash",
            s::MEMORY_OTHER => "Memory/Other",
            _ => "Memory/Unknown",
        },
        c::BRIDGE => match subclass {
            s::BRIDGE_HOST => "Bridge/Host",
            s::BRIDGE_ISA => "Bridge/ISA",
            s::BRIDGE_EISA => "Bridge/EISA",
            s::BRIDGE_MCA => "Bridge/MCA",
            s::BRIDGE_PCI2PCI => match prog_if {
                p::PCI2PCI_NORMAL => "Bridge/PCI2PCI/Normal",
                p::PCI2PCI_SUBTRACTIVE => "Bridge/PCI2PCI/Subtractive",
                _ => "Bridge/PCI2PCI/Unknown",
            },
            s::BRIDGE_PCMCIA => "Bridge/PCMCIA",
            s::BRIDGE_NUBUS => "Bridge/NuBus",
            s::BRIDGE_CARDBUS => "Bridge/CardBus",
            s::BRIDGE_RACEWAY => "Bridge/RaceWay",
            s::BRIDGE_SEMI_TRANSPARENT => match prog_if {
                p::SEMI_TRANSPARENT_PRIMARY => "Bridge/SEMITP2P/P",
                p::SEMI_TRANSPARENT_SECONDARY => "Bridge/SEMITP2P/S",
                _ => "Bridge/SEMITP2P/Unknown",
            },
            s::BRIDGE_INFINIBAND => "Bridge/InfiniBand",
            s::BRIDGE_OTHER => "Bridge/Other",
            _ => "Bridge/Unknown",
        },
        c::COMM => match subclass {
            s::COMM_16X50 => match prog_if {
                p::UART_XT => "Comm/16x50/XT",
                p::UART_16450 => "Comm/16x50/16450",
                p::UART_16550 => "Comm/16x50/16550",
                p::UART_16650 => "Comm/16x50/16650",
                p::UART_16750 => "Comm/16x50/16750",
                p::UART_16850 => "Comm/16x50/16850",
                p::UART_16950 => "Comm/16x50/16950",
                _ => "Comm/16x50/Unknown",
            },
            s::COMM_PARALLEL => match prog_if {
                p::PARALLEL_BASIC => "Comm/Parallel/Basic",
                p::PARALLEL_BIDIRECTIONAL => "Comm/Parallel/Bidirectional",
                p::PARALLEL_ECP => "Comm/Parallel/ECP",
                p::PARALLEL_1284 => "Comm/Parallel/1284",
                p::PARALLEL_1284_DEVICE => "Comm/Parallel/1284D",
                _ => "Comm/Parallel/Unknown",
            },
            s::COMM_MULTIPORT => "Comm/Multiport",
            s::COMM_MODEM => match prog_if {
                p::MODEM_GENERIC => "Comm/Modem/Generic",
                p::MODEM_HAYES_16450 => "Comm/Modem/Hayes_450",
                p::MODEM_HAYES_16550 => "Comm/Modem/Hayes_550",
                p::MODEM_HAYES_16650 => "Comm/Modem/Hayes_650",
                p::MODEM_HAYES_16750 => "Comm/Modem/Hayes_750",
                _ => "Comm/Modem/Unknown",
            },
            s::COMM_GPIB => "Comm/GPIB",
            s::COMM_SMARTCARD => "Comm/SmartCard",
            s::COMM_OTHER => "Comm/Other",
            _ => "Comm/Unknown",
        },
        c::SYSTEM => match subclass {
            s::SYSTEM_PIC => match prog_if {
                p::PIC_8259 => "System/PIC/8259",
                p::PIC_ISA => "System/PIC/ISA",
                p::PIC_EISA => "System/PIC/EISA",
                p::PIC_IOAPIC => "System/PIC/IOAPIC",
                p::PIC_IOXAPIC => "System/PIC/IOXAPIC",
                _ => "System/PIC/Unknown",
            },
            s::SYSTEM_DMA => match prog_if {
                p::DMA_8237 => "System/DMA/8237",
                p::DMA_ISA => "System/DMA/ISA",
                p::DMA_EISA => "System/DMA/EISA",
                _ => "System/DMA/Unknown",
            },
            s::SYSTEM_TIMER => match prog_if {
                p::TIMER_8254 => "System/Timer/8254",
                p::TIMER_ISA => "System/Timer/ISA",
                p::TIMER_EISA => "System/Timer/EISA",
                _ => "System/Timer/Unknown",
            },
            s::SYSTEM_RTC => match prog_if {
                p::RTC_GENERIC => "System/RTC/Generic",
                p::RTC_ISA => "System/RTC/ISA",
                _ => "System/RTC/Unknown",
            },
            s::SYSTEM_HOTPLUG => "System/Hotplug",
            s::SYSTEM_SDHOST => "System/SDHost",
            s::SYSTEM_OTHER => "System/Other",
            _ => "System/Unknown",
        },
        c::INPUT => match subclass {
            s::INPUT_KEYBOARD => "Input/Keyboard",
            s::INPUT_DIGITIZER => "Input/DigiPen",
            s::INPUT_MOUSE => "Input/Mouse",
            s::INPUT_SCANNER => "Input/Scanner",
            s::INPUT_GAMEPORT => match prog_if {
                p::GAMEPORT_GENERIC => "Input/Game/Generic",
                p::GAMEPORT_EXTENDED => "Input/Game/Standard",
                _ => "Input/Game/Unknown",
            },
            s::INPUT_OTHER => "Input/Other",
            _ => "Input/Unknown",
        },
        c::DOCKING => match subclass {
            s::DOCKING_GENERIC => "Docking/Generic",
            s::DOCKING_OTHER => "Docking/Other",
            _ => "Docking/Unknown",
        },
        c::PROCESSOR => match subclass {
            s::PROCESSOR_386 => "Processor/386",
            s::PROCESSOR_486 => "Processor/486",
            s::PROCESSOR_PENTIUM => "Processor/Pentium",
            s::PROCESSOR_ALPHA => "Processor/Alpha",
            s::PROCESSOR_POWERPC => "Processor/PPC",
            s::PROCESSOR_MIPS => "Processor/MIPS",
            s::PROCESSOR_COPROCESSOR => "Processor/Coprocessor",
            _ => "Processor/Unknown",
        },
        c::SERIAL => match subclass {
            s::SERIAL_IEEE1394 => match prog_if {
                p::IEEE1394_FIREWIRE => "Serial/IEEE1394/FW",
                _ => "Serial/IEEE1394/Unknown",
            },
            s::SERIAL_ACCESS_BUS => "Serial/AccessBus",
            s::SERIAL_SSA => "Serial/SSA",
            s::SERIAL_USB => match prog_if {
                p::USB_UHCI => "Serial/USB/UHCI",
                p::USB_OHCI => "Serial/USB/OHCI",
                p::USB_EHCI => "Serial/USB/EHCI",
                p::USB_XHCI => "Serial/USB/XHCI",
                p::USB_UNSPECIFIED => "Serial/USB/Unspecified",
                p::USB_DEVICE => "Serial/USB/USBDev",
                _ => "Serial/USB/Unknown",
            },
            s::SERIAL_FIBRE_CHANNEL => "Serial/FibreChannel",
            s::SERIAL_SMBUS => "Serial/SMBus",
            s::SERIAL_INFINIBAND => "Serial/InfiniBand",
            s::SERIAL_IPMI => match prog_if {
                p::IPMI_SMIC => "Serial/IPMI/SMIC",
                p::IPMI_KEYBOARD => "Serial/IPMI/Keyboard",
                p::IPMI_BLOCK => "Serial/IPMI/Block",
                _ => "Serial/IPMI/Unknown",
            },
            s::SERIAL_SERCOS => "Serial/SerCos",
            s::SERIAL_CANBUS => "Serial/CanBus",
            _ => "Serial/Unknown",
        },
        c::WIRELESS => match subclass {
            s::WIRELESS_IRDA => "Wireless/IRDA",
            s::WIRELESS_IR => "Wireless/IR",
            s::WIRELESS_RF => "Wireless/RF",
            s::WIRELESS_BLUETOOTH => "Wireless/BlueTooth",
            s::WIRELESS_BROADBAND => "Wireless/Broadband",
            s::WIRELESS_ETHERNET_5GHZ => "Wireless/Ethernet5GHz",
            s::WIRELESS_ETHERNET_2GHZ => "Wireless/Ethernet2.4GHz",
            s::WIRELESS_OTHER => "Wireless/Other",
            _ => "Wireless/Unknown",
        },
        c::INTELLIGENT => match subclass {
            s::INTELLIGENT_IO => match prog_if {
                p::I2O => "Intelligent/IO/I2O",
                p::I2O_FIFO => "Intelligent/IO/FIFO",
                _ => "Intelligent/IO/Unknown",
            },
            _ => "Intelligent/Unknown",
        },
        c::SATELLITE => match subclass {
            s::SATELLITE_TV => "Satellite/TV",
            s::SATELLITE_AUDIO => "Satellite/Audio",
            s::SATELLITE_VOICE => "Satellite/Voice",
            s::SATELLITE_DATA => "Satellite/Data",
            _ => "Satellite/Unknown",
        },
        c::ENCRYPTION => match subclass {
            s::ENCRYPTION_NETWORK => "Encryption/Net",
            s::ENCRYPTION_ENTERTAINMENT => "Encryption/Entain",
            s::ENCRYPTION_OTHER => "Encryption/Other",
            _ => "Encryption/Unknown",
        },
        c::DSP => match subclass {
            s::DSP_DPIO => "DSP/DPIO",
            s::DSP_PERF_COUNTERS => "DSP/PerfCount",
            s::DSP_COMM_SYNC => "DSP/CommSync",
            s::DSP_MANAGEMENT_CARD => "DSP/ManagementCard",
            s::DSP_OTHER => "DSP/Other",
            _ => "DSP/Unknown",
        },
        c::ACCELERATOR => "Accelerator/Unknown",
        c::INSTRUMENTATION => "Instrumentation/Unknown",
        c::COPROCESSOR => "Coprocessor/Unknown",
        c::UNASSIGNED => "Unassigned/Unknown",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every triple named by the code table.
    const KNOWN: &[(u8, u8, u8, &str)] = &[
        (0x00, 0x00, 0x00, "Unclassified/Old"),
        (0x00, 0x01, 0x00, "Unclassified/VGA"),
        (0x01, 0x00, 0x00, "Storage/SCSI"),
        (0x01, 0x01, 0x00, "Storage/IDE"),
        (0x01, 0x02, 0x00, "Storage/Floppy"),
        (0x01, 0x03, 0x00, "Storage/IPIBus"),
        (0x01, 0x04, 0x00, "Storage/RAID"),
        (0x01, 0x05, 0x00, "Storage/ATA"),
        (0x01, 0x06, 0x00, "Storage/SATA/Vendor Specific"),
        (0x01, 0x06, 0x01, "Storage/SATA/AHCI"),
        (0x01, 0x06, 0x02, "Storage/SATA/Serial"),
        (0x01, 0x07, 0x00, "Storage/SAS"),
        (0x01, 0x08, 0x02, "Storage/NVM/NVMe"),
        (0x01, 0x80, 0x00, "Storage/Mass"),
        (0x02, 0x00, 0x00, "Network/Ethernet"),
        (0x02, 0x01, 0x00, "Network/TokenRing"),
        (0x02, 0x02, 0x00, "Network/FDDI"),
        (0x02, 0x03, 0x00, "Network/ATM"),
        (0x02, 0x04, 0x00, "Network/ISDN"),
        (0x02, 0x05, 0x00, "Network/WFLIP"),
        (0x02, 0x06, 0x00, "Network/PICMGMC"),
        (0x02, 0x80, 0x00, "Network/Other"),
        (0x03, 0x00, 0x00, "Display/VGA/Standard"),
        (0x03, 0x00, 0x01, "Display/VGA/8514"),
        (0x03, 0x01, 0x00, "Display/XGA"),
        (0x03, 0x02, 0x00, "Display/3D"),
        (0x03, 0x80, 0x00, "Display/Other"),
        (0x04, 0x00, 0x00, "Multimedia/Video"),
        (0x04, 0x01, 0x00, "Multimedia/Audio"),
        (0x04, 0x02, 0x00, "Multimedia/Telephony"),
        (0x04, 0x80, 0x00, "Multimedia/Other"),
        (0x05, 0x00, 0x00, "Memory/RAM"),
        (0x05, 0x01, 0x00, "Memory/Flash"),
        (0x05, 0x80, 0x00, "Memory/Other"),
        (0x06, 0x00, 0x00, "Bridge/Host"),
        (0x06, 0x01, 0x00, "Bridge/ISA"),
        (0x06, 0x02, 0x00, "Bridge/EISA"),
        (0x06, 0x03, 0x00, "Bridge/MCA"),
        (0x06, 0x04, 0x00, "Bridge/PCI2PCI/Normal"),
        (0x06, 0x04, 0x01, "Bridge/PCI2PCI/Subtractive"),
        (0x06, 0x05, 0x00, "Bridge/PCMCIA"),
        (0x06, 0x06, 0x00, "Bridge/NuBus"),
        (0x06, 0x07, 0x00, "Bridge/CardBus"),
        (0x06, 0x08, 0x00, "Bridge/RaceWay"),
        (0x06, 0x09, 0x40, "Bridge/SEMITP2P/P"),
        (0x06, 0x09, 0x80, "Bridge/SEMITP2P/S"),
        (0x06, 0x0A, 0x00, "Bridge/InfiniBand"),
        (0x06, 0x80, 0x00, "Bridge/Other"),
        (0x07, 0x00, 0x00, "Comm/16x50/XT"),
        (0x07, 0x00, 0x01, "Comm/16x50/16450"),
        (0x07, 0x00, 0x02, "Comm/16x50/16550"),
        (0x07, 0x00, 0x03, "Comm/16x50/16650"),
        (0x07, 0x00, 0x04, "Comm/16x50/16750"),
        (0x07, 0x00, 0x05, "Comm/16x50/16850"),
        (0x07, 0x00, 0x06, "Comm/16x50/16950"),
        (0x07, 0x01, 0x00, "Comm/Parallel/Basic"),
        (0x07, 0x01, 0x01, "Comm/Parallel/Bidirectional"),
        (0x07, 0x01, 0x02, "Comm/Parallel/ECP"),
        (0x07, 0x01, 0x03, "Comm/Parallel/1284"),
        (0x07, 0x01, 0xFE, "Comm/Parallel/1284D"),
        (0x07, 0x02, 0x00, "Comm/Multiport"),
        (0x07, 0x03, 0x00, "Comm/Modem/Generic"),
        (0x07, 0x03, 0x01, "Comm/Modem/Hayes_450"),
        (0x07, 0x03, 0x02, "Comm/Modem/Hayes_550"),
        (0x07, 0x03, 0x03, "Comm/Modem/Hayes_650"),
        (0x07, 0x03, 0x04, "Comm/Modem/Hayes_750"),
        (0x07, 0x04, 0x00, "Comm/GPIB"),
        (0x07, 0x05, 0x00, "Comm/SmartCard"),
        (0x07, 0x80, 0x00, "Comm/Other"),
        (0x08, 0x00, 0x00, "System/PIC/8259"),
        (0x08, 0x00, 0x01, "System/PIC/ISA"),
        (0x08, 0x00, 0x02, "System/PIC/EISA"),
        (0x08, 0x00, 0x10, "System/PIC/IOAPIC"),
        (0x08, 0x00, 0x20, "System/PIC/IOXAPIC"),
        (0x08, 0x01, 0x00, "System/DMA/8237"),
        (0x08, 0x01, 0x01, "System/DMA/ISA"),
        (0x08, 0x01, 0x02, "System/DMA/EISA"),
        (0x08, 0x02, 0x00, "System/Timer/8254"),
        (0x08, 0x02, 0x01, "System/Timer/ISA"),
        (0x08, 0x02, 0x02, "System/Timer/EISA"),
        (0x08, 0x03, 0x00, "System/RTC/Generic"),
        (0x08, 0x03, 0x01, "System/RTC/ISA"),
        (0x08, 0x04, 0x00, "System/Hotplug"),
        (0x08, 0x05, 0x00, "System/SDHost"),
        (0x08, 0x80, 0x00, "System/Other"),
        (0x09, 0x00, 0x00, "Input/Keyboard"),
        (0x09, 0x01, 0x00, "Input/DigiPen"),
        (0x09, 0x02, 0x00, "Input/Mouse"),
        (0x09, 0x03, 0x00, "Input/Scanner"),
        (0x09, 0x04, 0x00, "Input/Game/Generic"),
        (0x09, 0x04, 0x10, "Input/Game/Standard"),
        (0x09, 0x80, 0x00, "Input/Other"),
        (0x0A, 0x00, 0x00, "Docking/Generic"),
        (0x0A, 0x80, 0x00, "Docking/Other"),
        (0x0B, 0x00, 0x00, "Processor/386"),
        (0x0B, 0x01, 0x00, "Processor/486"),
        (0x0B, 0x02, 0x00, "Processor/Pentium"),
        (0x0B, 0x10, 0x00, "Processor/Alpha"),
        (0x0B, 0x20, 0x00, "Processor/PPC"),
        (0x0B, 0x30, 0x00, "Processor/MIPS"),
        (0x0B, 0x40, 0x00, "Processor/Coprocessor"),
        (0x0C, 0x00, 0x00, "Serial/IEEE1394/FW"),
        (0x0C, 0x01, 0x00, "Serial/AccessBus"),
        (0x0C, 0x02, 0x00, "Serial/SSA"),
        (0x0C, 0x03, 0x00, "Serial/USB/UHCI"),
        (0x0C, 0x03, 0x10, "Serial/USB/OHCI"),
        (0x0C, 0x03, 0x20, "Serial/USB/EHCI"),
        (0x0C, 0x03, 0x30, "Serial/USB/XHCI"),
        (0x0C, 0x03, 0x80, "Serial/USB/Unspecified"),
        (0x0C, 0x03, 0xFE, "Serial/USB/USBDev"),
        (0x0C, 0x04, 0x00, "Serial/FibreChannel"),
        (0x0C, 0x05, 0x00, "Serial/SMBus"),
        (0x0C, 0x06, 0x00, "Serial/InfiniBand"),
        (0x0C, 0x07, 0x00, "Serial/IPMI/SMIC"),
        (0x0C, 0x07, 0x01, "Serial/IPMI/Keyboard"),
        (0x0C, 0x07, 0x02, "Serial/IPMI/Block"),
        (0x0C, 0x08, 0x00, "Serial/SerCos"),
        (0x0C, 0x09, 0x00, "Serial/CanBus"),
        (0x0D, 0x00, 0x00, "Wireless/IRDA"),
        (0x0D, 0x01, 0x00, "Wireless/IR"),
        (0x0D, 0x10, 0x00, "Wireless/RF"),
        (0x0D, 0x11, 0x00, "Wireless/BlueTooth"),
        (0x0D, 0x12, 0x00, "Wireless/Broadband"),
        (0x0D, 0x20, 0x00, "Wireless/Ethernet5GHz"),
        (0x0D, 0x21, 0x00, "Wireless/Ethernet2.4GHz"),
        (0x0D, 0x80, 0x00, "Wireless/Other"),
        (0x0E, 0x00, 0x00, "Intelligent/IO/I2O"),
        (0x0E, 0x00, 0x01, "Intelligent/IO/FIFO"),
        (0x0F, 0x01, 0x00, "Satellite/TV"),
        (0x0F, 0x02, 0x00, "Satellite/Audio"),
        (0x0F, 0x03, 0x00, "Satellite/Voice"),
        (0x0F, 0x04, 0x00, "Satellite/Data"),
        (0x10, 0x00, 0x00, "Encryption/Net"),
        (0x10, 0x10, 0x00, "Encryption/Entain"),
        (0x10, 0x80, 0x00, "Encryption/Other"),
        (0x11, 0x00, 0x00, "DSP/DPIO"),
        (0x11, 0x01, 0x00, "DSP/PerfCount"),
        (0x11, 0x10, 0x00, "DSP/CommSync"),
        (0x11, 0x20, 0x00, "DSP/ManagementCard"),
        (0x11, 0x80, 0x00, "DSP/Other"),
    ];

    /// One unlisted subclass per class and one unlisted programming interface
    /// per subclass that names them.
    const FALLBACKS: &[(u8, u8, u8, &str)] = &[
        (0x00, 0x02, 0x00, "Unclassified/Unknown"),
        (0x01, 0x06, 0x03, "Storage/SATA/Unknown"),
        (0x01, 0x08, 0x00, "Storage/NVM/Unknown"),
        (0x01, 0x09, 0x00, "Storage/Unknown"),
        (0x02, 0x07, 0x00, "Network/Unknown"),
        (0x03, 0x00, 0x02, "Display/VGA/Unknown"),
        (0x03, 0x03, 0x00, "Display/Unknown"),
        (0x04, 0x03, 0x00, "Multimedia/Unknown"),
        (0x05, 0x02, 0x00, "Memory/Unknown"),
        (0x06, 0x04, 0x02, "Bridge/PCI2PCI/Unknown"),
        (0x06, 0x09, 0x00, "Bridge/SEMITP2P/Unknown"),
        (0x06, 0x0B, 0x00, "Bridge/Unknown"),
        (0x07, 0x00, 0x07, "Comm/16x50/Unknown"),
        (0x07, 0x01, 0x04, "Comm/Parallel/Unknown"),
        (0x07, 0x03, 0x05, "Comm/Modem/Unknown"),
        (0x07, 0x06, 0x00, "Comm/Unknown"),
        (0x08, 0x00, 0x03, "System/PIC/Unknown"),
        (0x08, 0x01, 0x03, "System/DMA/Unknown"),
        (0x08, 0x02, 0x03, "System/Timer/Unknown"),
        (0x08, 0x03, 0x02, "System/RTC/Unknown"),
        (0x08, 0x06, 0x00, "System/Unknown"),
        (0x09, 0x04, 0x01, "Input/Game/Unknown"),
        (0x09, 0x05, 0x00, "Input/Unknown"),
        (0x0A, 0x01, 0x00, "Docking/Unknown"),
        (0x0B, 0x03, 0x00, "Processor/Unknown"),
        (0x0C, 0x00, 0x01, "Serial/IEEE1394/Unknown"),
        (0x0C, 0x03, 0x01, "Serial/USB/Unknown"),
        (0x0C, 0x07, 0x03, "Serial/IPMI/Unknown"),
        (0x0C, 0x0A, 0x00, "Serial/Unknown"),
        (0x0D, 0x02, 0x00, "Wireless/Unknown"),
        (0x0E, 0x00, 0x02, "Intelligent/IO/Unknown"),
        (0x0E, 0x01, 0x00, "Intelligent/Unknown"),
        (0x0F, 0x00, 0x00, "Satellite/Unknown"),
        (0x10, 0x01, 0x00, "Encryption/Unknown"),
        (0x11, 0x02, 0x00, "DSP/Unknown"),
        (0x12, 0x00, 0x00, "Accelerator/Unknown"),
        (0x13, 0x00, 0x00, "Instrumentation/Unknown"),
        (0x40, 0x00, 0x00, "Coprocessor/Unknown"),
        (0xFF, 0x00, 0x00, "Unassigned/Unknown"),
    ];

    #[test]
    fn known_triples_have_specific_names() {
        for &(c, s, p, name) in KNOWN {
            assert_eq!(describe(c, s, p), name, "{c:#04x}/{s:#04x}/{p:#04x}");
        }
    }

    #[test]
    fn unlisted_codes_fall_back_within_their_class() {
        for &(c, s, p, name) in FALLBACKS {
            assert_eq!(describe(c, s, p), name, "{c:#04x}/{s:#04x}/{p:#04x}");
        }
    }

    #[test]
    fn every_defined_class_is_named() {
        for c in (0x00..=0x13).chain([0x40, 0xFF]) {
            let d = describe(c, 0x7F, 0x7F);
            assert_ne!(d, "Unknown", "class {c:#04x}");
            assert!(d.ends_with("/Unknown"));
        }
    }

    #[test]
    fn undefined_class_is_exactly_unknown() {
        for c in (0x14..0x40).chain(0x41..0xFF) {
            assert_eq!(describe(c, 0, 0), "Unknown");
        }
    }

    #[test]
    fn unknown_prog_if_falls_back_per_subclass() {
        assert_eq!(describe(class::STORAGE, subclass::STORAGE_SATA, 0x7F), "Storage/SATA/Unknown");
        assert_eq!(describe(class::COMM, subclass::COMM_16X50, 0x42), "Comm/16x50/Unknown");
        assert_eq!(describe(class::SERIAL, subclass::SERIAL_USB, 0x01), "Serial/USB/Unknown");
    }

    #[test]
    fn describe_is_const() {
        const VGA: &str = describe(class::DISPLAY, subclass::DISPLAY_VGA, prog_if::VGA_STANDARD);
        assert_eq!(VGA, "Display/VGA/Standard");
    }
}
