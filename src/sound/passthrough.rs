//! The realtime part of the client: copy every input buffer to its output.
//!
//! This runs on the daemon's realtime thread.  It must not allocate, lock,
//! log, or block; the only work is one bounded copy per port pair.
use super::{AudioProcessor, Control, ProcessCycle};

/// Copies `frames` samples from `input` to `output`.
///
/// Samples past `frames` are left alone.  If either buffer is shorter than
/// `frames` only the common length is copied.
pub fn copy_frames(frames: usize, input: &[f32], output: &mut [f32]) {
    let n = frames.min(input.len()).min(output.len());
    output[..n].copy_from_slice(&input[..n]);
}

/// Pass-through processor.  Holds no state between cycles.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl PassThrough {
    pub fn new() -> PassThrough {
        PassThrough
    }
}

impl AudioProcessor for PassThrough {
    fn process(&mut self, cycle: &mut dyn ProcessCycle) -> Control {
        let frames = cycle.frames();
        for index in 0..cycle.pairs() {
            if let Some((input, output)) = cycle.pair(index) {
                copy_frames(frames, input, output);
            }
        }
        Control::Continue
    }
}

#[cfg(test)]
mod test_passthrough {
    use super::*;

    // in-memory cycle so the processor can run without a daemon
    struct VecCycle {
        frames: usize,
        inputs: Vec<Vec<f32>>,
        outputs: Vec<Vec<f32>>,
    }

    impl VecCycle {
        fn new(pairs: usize, capacity: usize, frames: usize) -> VecCycle {
            VecCycle {
                frames,
                inputs: vec![vec![0.0; capacity]; pairs],
                outputs: vec![vec![0.0; capacity]; pairs],
            }
        }
    }

    impl ProcessCycle for VecCycle {
        fn frames(&self) -> usize {
            self.frames
        }
        fn pairs(&self) -> usize {
            self.inputs.len()
        }
        fn pair(&mut self, index: usize) -> Option<(&[f32], &mut [f32])> {
            let input = self.inputs.get(index)?;
            let output = self.outputs.get_mut(index)?;
            Some((input.as_slice(), output.as_mut_slice()))
        }
    }

    #[test]
    fn four_pairs_256_frames_bit_identical() {
        let mut cycle = VecCycle::new(4, 256, 256);
        for (i, buf) in cycle.inputs.iter_mut().enumerate() {
            for (n, s) in buf.iter_mut().enumerate() {
                *s = ((n as f32) * 0.01 + i as f32).sin() * (i + 1) as f32 / 4.0;
            }
        }
        let expected = cycle.inputs.clone();
        let mut thru = PassThrough::new();
        assert_eq!(thru.process(&mut cycle), Control::Continue);
        for i in 0..4 {
            let got: Vec<u32> = cycle.outputs[i].iter().map(|s| s.to_bits()).collect();
            let want: Vec<u32> = expected[i].iter().map(|s| s.to_bits()).collect();
            assert_eq!(got, want);
        }
        // inputs are untouched
        assert_eq!(cycle.inputs, expected);
    }

    #[test]
    fn pairs_are_not_crossed() {
        let mut cycle = VecCycle::new(3, 16, 16);
        for (i, buf) in cycle.inputs.iter_mut().enumerate() {
            buf.fill(i as f32 + 1.0);
        }
        PassThrough::new().process(&mut cycle);
        assert!(cycle.outputs[0].iter().all(|s| *s == 1.0));
        assert!(cycle.outputs[1].iter().all(|s| *s == 2.0));
        assert!(cycle.outputs[2].iter().all(|s| *s == 3.0));
    }

    #[test]
    fn nothing_past_frame_count_is_written() {
        let mut cycle = VecCycle::new(2, 128, 64);
        for buf in cycle.inputs.iter_mut() {
            buf.fill(0.5);
        }
        for buf in cycle.outputs.iter_mut() {
            buf.fill(-1.0);
        }
        PassThrough::new().process(&mut cycle);
        for buf in cycle.outputs.iter() {
            assert!(buf[..64].iter().all(|s| *s == 0.5));
            assert!(buf[64..].iter().all(|s| *s == -1.0));
        }
    }

    #[test]
    fn frame_count_can_change_between_cycles() {
        let mut thru = PassThrough::new();
        let mut cycle = VecCycle::new(1, 512, 512);
        for (n, s) in cycle.inputs[0].iter_mut().enumerate() {
            *s = n as f32;
        }
        for frames in [32, 512, 1, 256] {
            cycle.frames = frames;
            cycle.outputs[0].fill(f32::NAN);
            thru.process(&mut cycle);
            assert_eq!(cycle.outputs[0][..frames], cycle.inputs[0][..frames]);
            assert!(cycle.outputs[0][frames..].iter().all(|s| s.is_nan()));
        }
    }

    #[test]
    fn zero_frames_is_a_no_op() {
        let mut cycle = VecCycle::new(2, 8, 0);
        for buf in cycle.inputs.iter_mut() {
            buf.fill(3.0);
        }
        assert_eq!(PassThrough::new().process(&mut cycle), Control::Continue);
        assert!(cycle.outputs.iter().all(|b| b.iter().all(|s| *s == 0.0)));
    }

    #[test]
    fn copy_frames_clamps_to_shorter_buffer() {
        let input = [1.0, 2.0, 3.0];
        let mut output = [0.0; 5];
        copy_frames(10, &input, &mut output);
        assert_eq!(output, [1.0, 2.0, 3.0, 0.0, 0.0]);

        let mut short = [0.0; 2];
        copy_frames(3, &input, &mut short);
        assert_eq!(short, [1.0, 2.0]);
    }
}
