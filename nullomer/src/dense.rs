//! Dense matrix storage with automatic memory alignment.

use std::fmt::Debug;
use std::fmt::Error as FmtError;
use std::fmt::Formatter;
use std::iter::ExactSizeIterator;
use std::ops::Index;
use std::ops::IndexMut;
use std::ops::Range;

use typenum::marker_traits::Unsigned;

// --- DefaultAlignment --------------------------------------------------------

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
type _DefaultAlignment = typenum::consts::U32;
#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
type _DefaultAlignment = typenum::consts::U16;

/// The default alignment used in dense matrices.
pub type DefaultAlignment = _DefaultAlignment;

// --- DenseMatrix -------------------------------------------------------------

/// A memory-aligned dense matrix with a constant number of columns.
///
/// All rows live in a single contiguous buffer, so that row `i` and column
/// `j` can be addressed as the flat index `i * columns + j`.
#[derive(Clone, PartialEq, Eq)]
pub struct DenseMatrix<T: Default + Copy, C: Unsigned, A: Unsigned = DefaultAlignment> {
    data: Vec<T>,
    offset: usize,
    rows: usize,
    _columns: std::marker::PhantomData<C>,
    _alignment: std::marker::PhantomData<A>,
}

impl<T: Default + Copy, C: Unsigned, A: Unsigned> DenseMatrix<T, C, A> {
    /// Create a new matrix with the given number of rows.
    pub fn new(rows: usize) -> Self {
        let data = Vec::new();
        let mut matrix = Self {
            data,
            offset: 0,
            rows: 0,
            _columns: std::marker::PhantomData,
            _alignment: std::marker::PhantomData,
        };
        matrix.resize(rows);
        matrix
    }

    /// The number of elements allocated for a matrix with `rows` rows.
    ///
    /// One extra row is always reserved to leave room for the alignment
    /// offset. Returns `None` if the size overflows.
    pub fn allocation(rows: usize) -> Option<usize> {
        rows.checked_add(1)?.checked_mul(Self::row_stride())
    }

    /// The stride of any matrix of this type, as a number of elements.
    pub const fn row_stride() -> usize {
        let x = std::mem::size_of::<T>();
        let c = C::USIZE * x;
        let b = c + (A::USIZE - c % A::USIZE) * ((c % A::USIZE) > 0) as usize;
        b / x + ((b % x) > 0) as usize
    }

    /// The stride of the matrix, as a number of elements.
    ///
    /// This may be different from the number of columns to account for memory
    /// alignment constraints. Multiply by `std::mem::size_of::<T>()` to obtain
    /// the stride in bytes.
    ///
    /// # Example
    /// ```rust
    /// # use typenum::{U21, U32};
    /// # use nullomer::dense::DenseMatrix;
    /// let d = DenseMatrix::<u64, U21, U32>::new(0);
    /// assert_eq!(d.stride(), 24);
    /// ```
    #[inline]
    pub const fn stride(&self) -> usize {
        Self::row_stride()
    }

    /// The number of rows of the matrix.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Change the number of rows of the matrix.
    pub fn resize(&mut self, rows: usize) {
        let c: usize = self.stride();

        let previous_rows = self.rows;
        let previous_offset = self.offset;

        if previous_rows > rows {
            self.data.truncate((rows + 1) * c);
        } else if previous_rows < rows {
            self.data.resize_with((rows + 1) * c, T::default);
            // Compute offset to aligned memory
            self.offset = 0;
            while self.data[self.offset..].as_ptr() as usize % A::USIZE > 0
                && self.offset < c
            {
                self.offset += 1
            }
            // Copy data in case alignment offset changed
            if previous_offset != self.offset {
                self.data.as_mut_slice().copy_within(
                    previous_offset..previous_offset + (previous_rows * c),
                    self.offset,
                );
            }
        }

        self.rows = rows;
    }

    /// Iterate over the rows of the matrix.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, C, A> {
        Iter::new(self)
    }

    /// Fill the entire matrix with a constant value.
    #[inline]
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T: Default + Copy + Debug, C: Unsigned, A: Unsigned> Debug for DenseMatrix<T, C, A> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), FmtError> {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Default + Copy, C: Unsigned, A: Unsigned> Index<usize> for DenseMatrix<T, C, A> {
    type Output = [T];
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        let c = self.stride();
        let row = self.offset + c * index;
        &self.data[row..row + C::USIZE]
    }
}

impl<T: Default + Copy, C: Unsigned, A: Unsigned> IndexMut<usize> for DenseMatrix<T, C, A> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let c = self.stride();
        let row = self.offset + c * index;
        &mut self.data[row..row + C::USIZE]
    }
}

// --- Iter --------------------------------------------------------------------

/// An iterator over the rows of a dense matrix.
pub struct Iter<'a, T, C, A>
where
    T: 'a + Default + Copy,
    C: Unsigned,
    A: Unsigned,
{
    matrix: &'a DenseMatrix<T, C, A>,
    indices: Range<usize>,
}

impl<'a, T, C, A> Iter<'a, T, C, A>
where
    T: 'a + Default + Copy,
    C: Unsigned,
    A: Unsigned,
{
    fn new(matrix: &'a DenseMatrix<T, C, A>) -> Self {
        let indices = 0..matrix.rows();
        Self { indices, matrix }
    }
}

impl<'a, T, C, A> Iterator for Iter<'a, T, C, A>
where
    T: Default + Copy,
    C: Unsigned,
    A: Unsigned,
{
    type Item = &'a [T];
    fn next(&mut self) -> Option<Self::Item> {
        let matrix = self.matrix;
        self.indices.next().map(|i| &matrix[i])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<'a, T, C, A> ExactSizeIterator for Iter<'a, T, C, A>
where
    T: Default + Copy,
    C: Unsigned,
    A: Unsigned,
{
    #[inline]
    fn len(&self) -> usize {
        self.indices.len()
    }
}
