use rayon::prelude::*;

const WORD_BITS: usize = 64;

/// Square boolean matrix with each row packed into `u64` words
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoolMatrix {
    size: usize,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl BoolMatrix {
    /// Create an all-false `size` x `size` matrix
    pub fn new(size: usize) -> Self {
        let words_per_row = (size + WORD_BITS - 1) / WORD_BITS;
        BoolMatrix {
            size,
            words_per_row,
            bits: vec![0; size * words_per_row],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Entry (p, q); anything outside the matrix reads as false
    pub fn get(&self, p: usize, q: usize) -> bool {
        if p >= self.size || q >= self.size {
            return false;
        }
        let word = self.bits[p * self.words_per_row + q / WORD_BITS];
        (word >> (q % WORD_BITS)) & 1 == 1
    }

    pub fn set(&mut self, p: usize, q: usize) {
        assert!(p < self.size && q < self.size, "({}, {}) outside {}x{} matrix", p, q, self.size, self.size);
        self.bits[p * self.words_per_row + q / WORD_BITS] |= 1u64 << (q % WORD_BITS);
    }

    /// Set (p, q) and (q, p)
    pub fn set_symmetric(&mut self, p: usize, q: usize) {
        self.set(p, q);
        self.set(q, p);
    }

    pub fn row(&self, p: usize) -> &[u64] {
        &self.bits[p * self.words_per_row..(p + 1) * self.words_per_row]
    }

    pub fn row_count_ones(&self, p: usize) -> usize {
        self.row(p).iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Columns set in row `p`, ascending
    pub fn row_ones(&self, p: usize) -> Vec<usize> {
        (0..self.size).filter(|&q| self.get(p, q)).collect()
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|p| (p + 1..self.size).all(|q| self.get(p, q) == self.get(q, p)))
    }

    /// boolean(M * Mᵗ): entry (p, q) is set when rows p and q share at
    /// least one set column, i.e. the count of common intermediates is positive
    pub fn mul_transpose(&self, parallel: bool) -> BoolMatrix {
        let mut out = BoolMatrix::new(self.size);
        let wpr = self.words_per_row;

        if wpr == 0 {
            return out;
        }

        if parallel {
            out.bits
                .par_chunks_mut(wpr)
                .enumerate()
                .for_each(|(p, out_row)| self.fill_product_row(p, out_row));
        } else {
            for (p, out_row) in out.bits.chunks_mut(wpr).enumerate() {
                self.fill_product_row(p, out_row);
            }
        }

        out
    }

    fn fill_product_row(&self, p: usize, out_row: &mut [u64]) {
        let row_p = self.row(p);
        if row_p.iter().all(|&w| w == 0) {
            return;
        }
        for q in 0..self.size {
            let shares = row_p
                .iter()
                .zip(self.row(q))
                .any(|(a, b)| a & b != 0);
            if shares {
                out_row[q / WORD_BITS] |= 1u64 << (q % WORD_BITS);
            }
        }
    }
}
