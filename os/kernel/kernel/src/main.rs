//! # Kernel Entry Point
//!
//! Bare-metal x86-64 image: the loader jumps to [`_start`] with paging off or
//! identity-mapped and interrupts disabled.

#![cfg_attr(target_os = "none", no_std, no_main)]
#![allow(unsafe_code)]

#[cfg(target_os = "none")]
mod bare_metal {
    use core::fmt::Write;
    use kernel::{BootConfig, BumpHeap, boot};
    use kernel_debugcon::{DebugLogger, PortSink};
    use kernel_pci::{IdentityMapper, PortIo};
    use log::{LevelFilter, error, info};

    const BOOT_STACK_SIZE: usize = 64 * 1024;

    /// 16-byte aligned stack.
    #[repr(align(16))]
    struct Aligned<const N: usize>([u8; N]);

    #[unsafe(link_section = ".bss.boot")]
    #[unsafe(no_mangle)]
    static mut BOOT_STACK: Aligned<BOOT_STACK_SIZE> = Aligned([0; BOOT_STACK_SIZE]);

    #[global_allocator]
    static HEAP: BumpHeap<{ 1024 * 1024 }> = BumpHeap::new();

    static DEBUGCON: PortSink = PortSink::BOCHS;
    static LOGGER: DebugLogger<PortSink> = DebugLogger::new(LevelFilter::Debug, &DEBUGCON);

    /// Entry point.
    ///
    /// Naked so that nothing touches the stack before `rsp` points at
    /// [`BOOT_STACK`].
    #[unsafe(no_mangle)]
    #[unsafe(naked)]
    pub extern "C" fn _start() -> ! {
        core::arch::naked_asm!(
            "cli",
            "lea rax, [rip + {stack_sym}]",
            "add rax, {stack_size}",
            "and rax, -16",
            "mov rsp, rax",
            // Emulate a CALL so that RSP % 16 == 8 at entry.
            "push 0",
            "xor rbp, rbp",
            "jmp {rust_entry}",
            stack_sym = sym BOOT_STACK,
            stack_size = const BOOT_STACK_SIZE,
            rust_entry = sym kernel_entry,
        );
    }

    extern "C" fn kernel_entry() -> ! {
        kernel_debugcon::debug_trace!("kernel: stack at {:p}\n", &raw const BOOT_STACK);
        let _ = LOGGER.init();
        info!("kernel: starting");

        // SAFETY: nothing else drives 0xCF8/0xCFC.
        let transport = unsafe { PortIo::new(PortIo::PC_WINDOW) };
        match boot(transport, &IdentityMapper, &BootConfig::DEFAULT) {
            Ok(summary) => {
                if let Some(mut console) = summary.console {
                    let _ = writeln!(console, "kernel: {} PCI functions", summary.pci.devices);
                }
            }
            Err(e) => error!("kernel: {e}"),
        }

        halt()
    }

    fn halt() -> ! {
        loop {
            // SAFETY: interrupts are off; this parks the core.
            unsafe { core::arch::asm!("hlt", options(nomem, nostack)) };
        }
    }

    #[panic_handler]
    fn panic(info: &core::panic::PanicInfo) -> ! {
        error!("kernel panic: {info}");
        halt()
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("the kernel image only runs on bare metal (x86_64-unknown-none)");
}
