//! The no-operation. Does nothing, and is good at it
use crate::authoring::*;

// ----- F O R W A R D --------------------------------------------------------------

fn fwd(_op: &Projection, operands: &mut [Coor2D]) -> usize {
    operands.len()
}

// ----- I N V E R S E --------------------------------------------------------------

fn inv(_op: &Projection, operands: &mut [Coor2D]) -> usize {
    operands.len()
}

// ----- C O N S T R U C T O R ------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 0] = [
];

pub fn new(parameters: &RawParameters) -> Result<Projection, Error> {
    Projection::plain(parameters, InnerOp(fwd), InnerOp(inv), &GAMUT)
}
