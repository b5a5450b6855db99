use std::{
    fmt::Display,
    fs::File,
    io::{Error, Write},
    path::Path,
};

/// Writes each item of an iterator to a text file, one line per item.
/// Hits serialize via their `Display` impl in the trigger-primitive line
/// format, so draining a hit list through this filter produces the sink
/// file directly.
pub(crate) trait SaveToFileFilter<I>
where
    I: Iterator,
    I::Item: Display,
{
    fn save_to_file(self, path: &Path) -> Result<(), Error>;
}

impl<I> SaveToFileFilter<I> for I
where
    I: Iterator,
    I::Item: Display,
{
    fn save_to_file(self, path: &Path) -> Result<(), Error> {
        let mut file = File::create(path)?;
        for item in self {
            writeln!(file, "{item}")?;
        }
        Ok(())
    }
}
