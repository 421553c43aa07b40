//! The bus transport between the driver and the SSD1325: a write-only SPI bus plus the D/C and
//! /RESET lines.

use hal::blocking::delay::DelayMs;

/// The capabilities the driver needs from the hardware connecting it to the display.
pub trait DisplayInterface {
    type Error;

    /// Send a command opcode and its operand bytes. Operands belong to the command stream, not
    /// display RAM, so they go out with the opcode under D/C low.
    fn send_command(&mut self, cmd: u8, args: &[u8]) -> Result<(), Self::Error>;

    /// Send bytes to be written into display RAM.
    fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error>;

    /// Pulse the hardware reset line. Returns once the display is out of reset.
    fn reset<D>(&mut self, delay: &mut D) -> Result<(), Self::Error>
    where
        D: DelayMs<u8>;
}

pub mod spi {
    //! The SPI interface supports the "4-wire" interface of the driver, such that each word on the
    //! SPI bus is 8 bits and a GPIO selects between command and data streams.

    use hal::blocking::delay::DelayMs;
    use hal::blocking::spi::Write;
    use hal::digital::v2::OutputPin;

    use super::DisplayInterface;

    /// Width of the /RESET low pulse in milliseconds.
    pub const RESET_PULSE_MS: u8 = 10;

    /// Longest command (opcode plus operands) that goes out as a single SPI write.
    const COMMAND_BURST_LEN: usize = 16;

    /// Failure of one of the pieces of hardware behind `SpiInterface`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum TransportError<SpiE, DcE, RstE> {
        /// An SPI write failed.
        Spi(SpiE),
        /// The D/C line could not be driven.
        Dc(DcE),
        /// The /RESET line could not be driven.
        Reset(RstE),
    }

    pub struct SpiInterface<SPI, DC, RST> {
        /// The SPI master device connected to the SSD1325.
        spi: SPI,
        /// A GPIO output pin connected to the D/C (data/command) pin of the SSD1325 (the fourth
        /// "wire" of "4-wire" mode). Low for commands, high for display RAM data.
        dc: DC,
        /// A GPIO output pin connected to the /RESET pin of the SSD1325. Idles high.
        rst: RST,
    }

    impl<SPI, DC, RST> SpiInterface<SPI, DC, RST>
    where
        SPI: Write<u8>,
        DC: OutputPin,
        RST: OutputPin,
    {
        /// Create a new SPI interface to communicate with the display driver. `spi` is the SPI
        /// master device, `dc` the GPIO output connected to the D/C pin, and `rst` the GPIO output
        /// connected to /RESET. D/C is driven low and /RESET high before returning.
        pub fn new(
            spi: SPI,
            mut dc: DC,
            mut rst: RST,
        ) -> Result<Self, TransportError<SPI::Error, DC::Error, RST::Error>> {
            dc.set_low().map_err(TransportError::Dc)?;
            rst.set_high().map_err(TransportError::Reset)?;
            Ok(Self { spi, dc, rst })
        }

        /// Give back the bus and the two lines.
        pub fn release(self) -> (SPI, DC, RST) {
            (self.spi, self.dc, self.rst)
        }
    }

    impl<SPI, DC, RST> DisplayInterface for SpiInterface<SPI, DC, RST>
    where
        SPI: Write<u8>,
        DC: OutputPin,
        RST: OutputPin,
    {
        type Error = TransportError<SPI::Error, DC::Error, RST::Error>;

        /// D/C is held low for the opcode and all operands, then left high.
        fn send_command(&mut self, cmd: u8, args: &[u8]) -> Result<(), Self::Error> {
            self.dc.set_low().map_err(TransportError::Dc)?;
            if args.len() < COMMAND_BURST_LEN {
                let mut burst = [0u8; COMMAND_BURST_LEN];
                burst[0] = cmd;
                burst[1..=args.len()].copy_from_slice(args);
                self.spi
                    .write(&burst[..=args.len()])
                    .map_err(TransportError::Spi)?;
            } else {
                self.spi.write(&[cmd]).map_err(TransportError::Spi)?;
                self.spi.write(args).map_err(TransportError::Spi)?;
            }
            self.dc.set_high().map_err(TransportError::Dc)
        }

        /// D/C is raised for the burst and dropped again afterwards.
        fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            self.dc.set_high().map_err(TransportError::Dc)?;
            self.spi.write(buf).map_err(TransportError::Spi)?;
            self.dc.set_low().map_err(TransportError::Dc)
        }

        fn reset<D>(&mut self, delay: &mut D) -> Result<(), Self::Error>
        where
            D: DelayMs<u8>,
        {
            self.rst.set_low().map_err(TransportError::Reset)?;
            delay.delay_ms(RESET_PULSE_MS);
            self.rst.set_high().map_err(TransportError::Reset)
        }
    }

}

#[cfg(test)]
pub mod test_bus {
    //! Fake SPI bus, GPIO lines and delay that record every action into one shared, ordered
    //! trace, so line-level framing can be checked.

    use std::cell::{Cell, RefCell};
    use std::convert::Infallible;
    use std::rc::Rc;
    use std::vec::Vec;

    use hal::blocking::delay::DelayMs;
    use hal::blocking::spi::Write;
    use hal::digital::v2::OutputPin;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Event {
        Dc(bool),
        Rst(bool),
        Write(Vec<u8>),
        Delay(u8),
    }

    #[derive(Clone)]
    pub struct TestBus {
        trace: Rc<RefCell<Vec<Event>>>,
        fail_writes: Rc<Cell<bool>>,
    }

    pub struct TestSpi(TestBus);
    pub struct TestDc(TestBus);
    pub struct TestRst(TestBus);
    pub struct TestDelay(TestBus);

    impl TestBus {
        pub fn new() -> Self {
            TestBus {
                trace: Rc::new(RefCell::new(Vec::new())),
                fail_writes: Rc::new(Cell::new(false)),
            }
        }
        pub fn spi(&self) -> TestSpi {
            TestSpi(self.clone())
        }
        pub fn dc(&self) -> TestDc {
            TestDc(self.clone())
        }
        pub fn rst(&self) -> TestRst {
            TestRst(self.clone())
        }
        pub fn delay(&self) -> TestDelay {
            TestDelay(self.clone())
        }
        pub fn fail_writes(&self) {
            self.fail_writes.set(true);
        }
        pub fn events(&self) -> Vec<Event> {
            self.trace.borrow().clone()
        }
        pub fn check(&self, expect: &[Event]) {
            assert_eq!(&self.trace.borrow()[..], expect);
        }
        pub fn clear(&self) {
            self.trace.borrow_mut().clear();
        }
        fn record(&self, event: Event) {
            self.trace.borrow_mut().push(event);
        }
    }

    impl Write<u8> for TestSpi {
        type Error = ();
        fn write(&mut self, words: &[u8]) -> Result<(), ()> {
            if self.0.fail_writes.get() {
                return Err(());
            }
            self.0.record(Event::Write(words.to_vec()));
            Ok(())
        }
    }

    impl OutputPin for TestDc {
        type Error = Infallible;
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.record(Event::Dc(false));
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.record(Event::Dc(true));
            Ok(())
        }
    }

    impl OutputPin for TestRst {
        type Error = Infallible;
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.record(Event::Rst(false));
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.record(Event::Rst(true));
            Ok(())
        }
    }

    impl DelayMs<u8> for TestDelay {
        fn delay_ms(&mut self, ms: u8) {
            self.0.record(Event::Delay(ms));
        }
    }
}

#[cfg(test)]
#[macro_use]
pub mod test_spy {
    //! An interface for use in unit tests to spy on whatever was sent to it.

    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::vec::Vec;

    use hal::blocking::delay::DelayMs;

    use super::DisplayInterface;

    macro_rules! send {
        (reset) => {Sent::Reset};
        ({$ms:expr}) => {Sent::Delay($ms)};
        ([$($d:expr),*]) => {Sent::Data(vec![$($d,)*])};
        (($c:expr $(, $a:expr)*)) => {Sent::Cmd($c, vec![$($a,)*])};
    }
    macro_rules! sends {
        ($($e:tt),* $(,)*) => {&[$(send!($e),)*]};
    }

    #[derive(Clone, Debug, PartialEq)]
    pub enum Sent {
        Cmd(u8, Vec<u8>),
        Data(Vec<u8>),
        Reset,
        Delay(u8),
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SpyError;

    /// Every clone shares the same record, so a test can hand one to a `Display` and keep another
    /// to inspect what was sent.
    #[derive(Clone)]
    pub struct TestSpyInterface {
        sent: Rc<RefCell<Vec<Sent>>>,
        fail_after: Rc<Cell<Option<usize>>>,
    }

    pub struct SpyDelay(TestSpyInterface);

    impl TestSpyInterface {
        pub fn new() -> Self {
            TestSpyInterface {
                sent: Rc::new(RefCell::new(Vec::new())),
                fail_after: Rc::new(Cell::new(None)),
            }
        }
        pub fn split(&self) -> Self {
            self.clone()
        }
        pub fn delay(&self) -> SpyDelay {
            SpyDelay(self.clone())
        }
        /// Let `n` more sends through, then fail every one after.
        pub fn fail_after(&self, n: usize) {
            self.fail_after.set(Some(n));
        }
        pub fn sent(&self) -> Vec<Sent> {
            self.sent.borrow().clone()
        }
        pub fn check_multi(&self, expect: &[Sent]) {
            assert_eq!(&self.sent.borrow()[..], expect);
        }
        pub fn clear(&mut self) {
            self.sent.borrow_mut().clear();
        }
        fn record(&self, sent: Sent) -> Result<(), SpyError> {
            match self.fail_after.get() {
                Some(0) => return Err(SpyError),
                Some(n) => self.fail_after.set(Some(n - 1)),
                None => {}
            }
            self.sent.borrow_mut().push(sent);
            Ok(())
        }
    }

    impl DisplayInterface for TestSpyInterface {
        type Error = SpyError;

        fn send_command(&mut self, cmd: u8, args: &[u8]) -> Result<(), SpyError> {
            self.record(Sent::Cmd(cmd, args.to_vec()))
        }
        fn send_data(&mut self, data: &[u8]) -> Result<(), SpyError> {
            self.record(Sent::Data(data.to_vec()))
        }
        fn reset<D>(&mut self, _delay: &mut D) -> Result<(), SpyError>
        where
            D: DelayMs<u8>,
        {
            self.record(Sent::Reset)
        }
    }

    impl DelayMs<u8> for SpyDelay {
        fn delay_ms(&mut self, ms: u8) {
            self.0.sent.borrow_mut().push(Sent::Delay(ms));
        }
    }
}
