/// Attach a scalar attribute `$name` with value `$value` to an hdf5 group.
macro_rules! write_attr {
    ($group:expr, $name:expr, $value:expr) => {
        $group
            .new_attr_builder()
            .with_data(&[$value][..])
            .create($name)
    };
}

/// Write one value per cell, extracted from `$cells` by `$extract`, as a dataset.
macro_rules! write_cell_dataset {
    ($group:expr, $name:expr, $cells:expr, $extract:expr) => {
        $group
            .new_dataset_builder()
            .with_data(&$cells.iter().map($extract).collect::<Vec<_>>())
            .create($name)
    };
}

pub(crate) use write_attr;
pub(crate) use write_cell_dataset;
