use std::{
    env,
    fs::File,
    io::{self, BufReader, Result},
};

// Run this example by running the following in the terminal:
// ```
// cargo run --example compress_file -- test.tar && xz -t test.tar.xz
// ```

fn main() -> Result<()> {
    let path = env::args().nth(1).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "usage: compress_file <path>")
    })?;

    let mut input = BufReader::new(File::open(&path)?);
    let output = File::create(format!("{path}.xz"))?;

    // Compress at the highest level, streaming the file through the encoder
    let mut writer = xz_stream::Writer::with_level(output, xz_stream::BEST_COMPRESSION)?;
    io::copy(&mut input, &mut writer)?;

    // Finish the stream and make sure it reaches the disk
    let output = writer.finish()?;
    output.sync_all()?;

    eprintln!(
        "{path}: {} compressed bytes written",
        output.metadata()?.len()
    );

    Ok(())
}
