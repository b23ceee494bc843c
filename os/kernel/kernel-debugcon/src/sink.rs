use core::fmt;

/// A destination for single debug bytes.
///
/// Implementations must tolerate being called from any point of the boot
/// sequence, including from the panic handler.
pub trait DebugSink {
    fn put_byte(&self, byte: u8);

    fn put_bytes(&self, bytes: &[u8]) {
        for &b in bytes {
            self.put_byte(b);
        }
    }
}

impl<S: DebugSink + ?Sized> DebugSink for &S {
    #[inline]
    fn put_byte(&self, byte: u8) {
        (**self).put_byte(byte);
    }
}

/// A single x86 I/O port that swallows bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PortSink {
    port: u16,
}

impl PortSink {
    /// The Bochs / QEMU `isa-debugcon` port.
    pub const BOCHS: Self = Self { port: 0xE9 };

    /// # Safety
    /// Writing arbitrary bytes to `port` must be harmless for whatever device
    /// decodes it.
    #[must_use]
    pub const unsafe fn new(port: u16) -> Self {
        Self { port }
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }
}

impl DebugSink for PortSink {
    #[inline]
    fn put_byte(&self, byte: u8) {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        unsafe {
            kernel_ports::outb(self.port, byte);
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
        let _ = byte;
    }
}

/// A single memory-mapped transmit register.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MmioSink {
    addr: usize,
}

impl MmioSink {
    /// # Safety
    /// `addr` must stay mapped and writable for as long as the sink is used,
    /// and byte stores to it must only emit characters.
    #[must_use]
    pub const unsafe fn new(addr: usize) -> Self {
        Self { addr }
    }
}

impl DebugSink for MmioSink {
    #[inline]
    fn put_byte(&self, byte: u8) {
        // SAFETY: guaranteed by the constructor contract.
        unsafe { core::ptr::write_volatile(self.addr as *mut u8, byte) }
    }
}

/// `core::fmt::Write` adapter over any [`DebugSink`].
pub struct SinkWriter<'a, S: ?Sized> {
    sink: &'a S,
}

impl<'a, S: DebugSink + ?Sized> SinkWriter<'a, S> {
    pub const fn new(sink: &'a S) -> Self {
        Self { sink }
    }
}

impl<S: DebugSink + ?Sized> fmt::Write for SinkWriter<'_, S> {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.sink.put_bytes(s.as_bytes());
        Ok(())
    }

    #[inline]
    fn write_char(&mut self, c: char) -> fmt::Result {
        // UTF-8 encode without allocation.
        let mut buf = [0u8; 4];
        self.write_str(c.encode_utf8(&mut buf))
    }
}
