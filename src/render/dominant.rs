//! Dominant colour extraction via modified median cut quantization (MMCQ).
//!
//! Pixels are bucketed into a 5-bit-per-channel histogram, the occupied colour cube is split at
//! channel medians until a small palette remains, and the most populous box wins.

use crate::foundation::core::Rgba8;
use crate::foundation::error::{ContrastError, ContrastResult};

const SIGBITS: u32 = 5;
const RSHIFT: u32 = 8 - SIGBITS;
const SIDE: usize = 1 << SIGBITS;
const MAX_ITERATIONS: usize = 1000;
const FRACT_BY_POPULATION: f64 = 0.75;
/// Pixels more transparent than this are ignored.
const MIN_ALPHA: u8 = 125;

fn hist_index(r: usize, g: usize, b: usize) -> usize {
    (r << (2 * SIGBITS)) | (g << SIGBITS) | b
}

/// Per-cell pixel counts plus the exact channel sums of the pixels in each cell.
struct Histogram {
    counts: Vec<u64>,
    sums: Vec<[u64; 3]>,
}

impl Histogram {
    fn new() -> Self {
        let len = SIDE * SIDE * SIDE;
        Self {
            counts: vec![0; len],
            sums: vec![[0; 3]; len],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    R,
    G,
    B,
}

#[derive(Clone, Copy, Debug)]
struct VBox {
    lo: [usize; 3],
    hi: [usize; 3],
    count: u64,
}

impl VBox {
    fn new(lo: [usize; 3], hi: [usize; 3], histo: &Histogram) -> Self {
        let mut vbox = Self { lo, hi, count: 0 };
        vbox.count = vbox.cells().map(|i| histo.counts[i]).sum();
        vbox
    }

    fn cells(&self) -> impl Iterator<Item = usize> + '_ {
        (self.lo[0]..=self.hi[0]).flat_map(move |r| {
            (self.lo[1]..=self.hi[1])
                .flat_map(move |g| (self.lo[2]..=self.hi[2]).map(move |b| hist_index(r, g, b)))
        })
    }

    fn extent(&self, axis: Axis) -> usize {
        let i = axis as usize;
        self.hi[i] - self.lo[i] + 1
    }

    fn volume(&self) -> u64 {
        [Axis::R, Axis::G, Axis::B]
            .iter()
            .map(|a| self.extent(*a) as u64)
            .product()
    }

    /// Mean colour of the pixels inside the box, or the box centre when empty.
    fn average(&self, histo: &Histogram) -> Rgba8 {
        let mut sums = [0u64; 3];
        for i in self.cells() {
            for (acc, v) in sums.iter_mut().zip(histo.sums[i]) {
                *acc += v;
            }
        }
        let channel = |c: usize| -> u8 {
            if self.count > 0 {
                (sums[c] as f64 / self.count as f64).round().clamp(0.0, 255.0) as u8
            } else {
                let mult = 1usize << RSHIFT;
                ((self.lo[c] + self.hi[c] + 1) * mult / 2).min(255) as u8
            }
        };
        Rgba8::opaque(channel(0), channel(1), channel(2))
    }

    /// Split at the median of the longest axis.
    fn split(&self, histo: &Histogram) -> Option<(Self, Self)> {
        if self.count == 0 || self.volume() == 1 {
            return None;
        }

        let axis = [Axis::R, Axis::G, Axis::B]
            .into_iter()
            .max_by(|a, b| {
                self.extent(*a)
                    .cmp(&self.extent(*b))
                    // Ties go to the earlier channel.
                    .then((*b as usize).cmp(&(*a as usize)))
            })
            .unwrap_or(Axis::R);
        let ai = axis as usize;

        let (lo, hi) = (self.lo[ai], self.hi[ai]);
        let mut acc = 0u64;
        let mut cut = hi - 1;
        for v in lo..hi {
            let mut slab = *self;
            slab.lo[ai] = v;
            slab.hi[ai] = v;
            acc += slab.cells().map(|i| histo.counts[i]).sum::<u64>();
            if acc * 2 >= self.count {
                cut = v;
                break;
            }
        }

        let mut left_hi = self.hi;
        left_hi[ai] = cut;
        let mut right_lo = self.lo;
        right_lo[ai] = cut + 1;
        Some((
            Self::new(self.lo, left_hi, histo),
            Self::new(right_lo, self.hi, histo),
        ))
    }
}

/// Repeatedly split the highest-priority splittable box until `target` boxes exist.
fn iterate(
    boxes: &mut Vec<VBox>,
    target: usize,
    histo: &Histogram,
    priority: impl Fn(&VBox) -> u64,
) {
    for _ in 0..MAX_ITERATIONS {
        if boxes.len() >= target {
            return;
        }
        boxes.sort_by_key(|b| std::cmp::Reverse(priority(b)));
        let Some(pos) = boxes.iter().position(|b| b.split(histo).is_some()) else {
            return;
        };
        let vbox = boxes.remove(pos);
        if let Some((a, b)) = vbox.split(histo) {
            boxes.push(a);
            boxes.push(b);
        }
    }
}

/// Dominant colour of `pixels`, sampling every `stride`-th pixel.
///
/// At least the first pixel is always sampled. Pixels with alpha below 125 are skipped; when
/// nothing survives, resolution fails.
pub fn dominant_color(
    pixels: &image::RgbaImage,
    stride: usize,
    palette_size: usize,
) -> ContrastResult<Rgba8> {
    if stride == 0 || palette_size == 0 {
        return Err(ContrastError::validation(
            "sample stride and palette size must be >= 1",
        ));
    }

    let mut histo = Histogram::new();
    let mut lo = [SIDE - 1; 3];
    let mut hi = [0usize; 3];
    let mut sampled = 0u64;
    for px in pixels.pixels().step_by(stride) {
        let [r, g, b, a] = px.0;
        if a < MIN_ALPHA {
            continue;
        }
        let q = [
            usize::from(r >> RSHIFT),
            usize::from(g >> RSHIFT),
            usize::from(b >> RSHIFT),
        ];
        let cell = hist_index(q[0], q[1], q[2]);
        histo.counts[cell] += 1;
        for (acc, v) in histo.sums[cell].iter_mut().zip([r, g, b]) {
            *acc += u64::from(v);
        }
        for i in 0..3 {
            lo[i] = lo[i].min(q[i]);
            hi[i] = hi[i].max(q[i]);
        }
        sampled += 1;
    }
    if sampled == 0 {
        return Err(ContrastError::resolution(
            "no opaque pixels in sampled region",
        ));
    }

    let mut boxes = vec![VBox::new(lo, hi, &histo)];
    let first_pass = ((FRACT_BY_POPULATION * palette_size as f64).ceil() as usize).max(1);
    iterate(&mut boxes, first_pass, &histo, |b| b.count);
    iterate(&mut boxes, palette_size, &histo, |b| b.count * b.volume());

    boxes
        .iter()
        .max_by_key(|b| b.count)
        .map(|b| b.average(&histo))
        .ok_or_else(|| ContrastError::resolution("empty palette"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/dominant.rs"]
mod tests;
