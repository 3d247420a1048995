//! Exponent matrices of two published QC-LDPC codes.

use qc_ldpc::{ExponentMatrix, QcLdpcCode};

pub const C2_LIFTING: usize = 403;
pub const C3_LIFTING: usize = 251;

/// C2(3224, 1612), (4, 8)-regular.
pub fn c2() -> QcLdpcCode {
    let exponents = ExponentMatrix::new(vec![
        vec![345, 152, 72, 376, 377, 197, 4, 144],
        vec![187, 398, 320, 225, 330, 198, 79, 289],
        vec![271, 165, 259, 105, 288, 254, 51, 236],
        vec![111, 233, 380, 332, 47, 76, 222, 247],
    ])
    .expect("C2 exponent matrix");

    QcLdpcCode::new("C2", 3224, 1612, C2_LIFTING, exponents).expect("C2 code")
}

/// C3(4016, 2761), (5, 16)-regular. The exponent matrix is published as a
/// left and a right half.
pub fn c3() -> QcLdpcCode {
    let left = ExponentMatrix::new(vec![
        vec![6, 98, 208, 177, 76, 76, 76, 48],
        vec![198, 42, 155, 127, 29, 32, 35, 10],
        vec![31, 211, 158, 0, 238, 111, 199, 8],
        vec![117, 51, 3, 65, 57, 150, 243, 57],
        vec![181, 142, 121, 210, 229, 98, 218, 59],
    ])
    .expect("C3 left half");
    let right = ExponentMatrix::new(vec![
        vec![111, 76, 76, 34, 76, 76, 64, 85],
        vec![76, 44, 47, 8, 53, 56, 47, 71],
        vec![195, 248, 121, 167, 46, 170, 246, 140],
        vec![213, 20, 113, 164, 48, 141, 222, 85],
        vec![242, 76, 196, 23, 185, 54, 162, 52],
    ])
    .expect("C3 right half");

    let exponents = left.hstack(&right).expect("C3 halves share a row count");
    QcLdpcCode::new("C3", 4016, 2761, C3_LIFTING, exponents).expect("C3 code")
}
