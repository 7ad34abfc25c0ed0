//! DHT11 driver over the Linux GPIO character device.
//!
//! The sensor speaks a single-wire protocol: the host holds the line low to
//! request a frame, the sensor answers with an 80us low / 80us high preamble
//! and then 40 bits, each a ~50us low followed by a high pulse whose width
//! encodes the bit (~26us for 0, ~70us for 1).

use gpio_cdev::{Chip, Line, LineHandle, LineRequestFlags};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::NAME;
use crate::domain::{Humidity, Sample, Temperature};
use crate::error::SensorError;
use crate::reader::Sensor;

const HIGH: u8 = 1;
const LOW: u8 = 0;

const START_LOW: Duration = Duration::from_millis(18);
const LEVEL_TIMEOUT: Duration = Duration::from_micros(250);
const ONE_THRESHOLD: Duration = Duration::from_micros(50);

const FRAME_BITS: usize = 40;
const FRAME_BYTES: usize = FRAME_BITS / 8;

pub struct Dht11 {
    line: Line,
    handle: Option<LineHandle>,
}

impl Dht11 {
    pub fn open(device: &str, pin: u32) -> Result<Dht11, SensorError> {
        let mut chip = Chip::new(device)?;
        let line = chip.get_line(pin)?;

        Ok(Dht11 { line, handle: None })
    }

    fn capture(&mut self) -> Result<Vec<Duration>, SensorError> {
        // The line can only be requested once, so give up the input handle first.
        self.handle = None;

        let output = self.line.request(LineRequestFlags::OUTPUT, HIGH, NAME)?;
        output.set_value(LOW)?;
        thread::sleep(START_LOW);
        output.set_value(HIGH)?;
        drop(output);

        let input = self.line.request(LineRequestFlags::INPUT, 0, NAME)?;

        // Pull-up, then the sensor's response preamble.
        wait_while(&input, HIGH)?;
        wait_while(&input, LOW)?;
        wait_while(&input, HIGH)?;

        let mut pulses = Vec::with_capacity(FRAME_BITS);

        for _ in 0..FRAME_BITS {
            let width = wait_while(&input, LOW).and_then(|_| wait_while(&input, HIGH));

            match width {
                Ok(width) => pulses.push(width),
                Err(SensorError::Timeout { .. }) => break,
                Err(error) => return Err(error),
            }
        }

        self.handle = Some(input);

        Ok(pulses)
    }
}

impl Sensor for Dht11 {
    fn measure(&mut self) -> Result<Sample, SensorError> {
        let pulses = self.capture()?;
        let frame = decode_pulses(&pulses)?;
        let (temperature, humidity) = decode_frame(frame)?;

        debug!(?frame, %temperature, %humidity, "dht11 frame decoded");

        Ok(Sample::new(temperature, humidity))
    }

    fn release(&mut self) {
        if self.handle.take().is_some() {
            info!("dht11 line released");
        }
    }
}

fn wait_while(handle: &LineHandle, level: u8) -> Result<Duration, SensorError> {
    let start = Instant::now();

    while handle.get_value()? == level {
        if start.elapsed() > LEVEL_TIMEOUT {
            return Err(SensorError::Timeout { level });
        }
    }

    Ok(start.elapsed())
}

pub fn decode_pulses(pulses: &[Duration]) -> Result<[u8; FRAME_BYTES], SensorError> {
    if pulses.len() < FRAME_BITS {
        return Err(SensorError::IncompleteFrame { got: pulses.len() });
    }

    let mut frame = [0u8; FRAME_BYTES];

    for (idx, width) in pulses[..FRAME_BITS].iter().enumerate() {
        if *width > ONE_THRESHOLD {
            frame[idx / 8] |= 1 << (7 - idx % 8);
        }
    }

    Ok(frame)
}

pub fn decode_frame(frame: [u8; FRAME_BYTES]) -> Result<(Temperature, Humidity), SensorError> {
    let actual = frame[..4].iter().fold(0u8, |sum, byte| sum.wrapping_add(*byte));

    if actual != frame[4] {
        return Err(SensorError::Checksum {
            expected: frame[4],
            actual,
        });
    }

    let humidity = frame[0] as f32 + frame[1] as f32 / 10.0;
    let mut temperature = frame[2] as f32 + (frame[3] & 0x0f) as f32 / 10.0;

    if frame[3] & 0x80 != 0 {
        temperature = -temperature;
    }

    Ok((Temperature(temperature), Humidity(humidity)))
}
