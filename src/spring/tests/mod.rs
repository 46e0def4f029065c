mod test_arc_basic;
mod test_compression_basic;
mod test_spiral_basic;
mod test_torsion_basic;
