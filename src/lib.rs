// This file has code from https://github.com/LIHPC-Computational-Geometry/coupe
pub mod graph;
pub mod gap;
pub mod io;
pub mod algorithms;

// The `Partition` trait allows for partitioning data.
// Partitioning algorithms implement this trait.
// The generic argument `M` defines the input of the algorithms (here a
// vertex-weighted graph).
// The input partition must be of the correct size; its previous contents are
// overwritten.
pub trait Partition<M> {
    // Diagnostic data returned for a specific run of the algorithm.
    type Metadata;

    // Error details, should the algorithm fail to run.
    type Error;

    // Partition the given data and output the part ID of each element in
    // `part_ids`.
    //
    // Part IDs are contiguous and start from zero, meaning the number of
    // parts is one plus the maximum of `part_ids`.
    fn partition(&mut self, part_ids: &mut [usize], data: M)
                 -> Result<Self::Metadata, Self::Error>;
}
