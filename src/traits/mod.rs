mod structure_ops;
