use hdd_kit::{Dir, File, Path, PathOptions};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let tmp = std::env::temp_dir();
    println!("Temp dir: {}", tmp.display());

    let tmp = tmp
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("temp dir is not valid UTF-8"))?;
    let root = format!("{tmp}/my_hdd");
    let root = root.as_str();

    // creates `/tmp/my_hdd/docs` (and `/tmp/my_hdd` if needed);
    // `true` asks for the last segment to be created as well
    let docs = Path::new(format!("{root}/docs"), PathOptions::empty())?;
    docs.create_dirs(true)?;

    // backslashes are accepted too, the stored path uses the platform separator
    let mut first = File::new(format!("{root}\\docs\\first.txt"), PathOptions::empty())?;
    first.delete_if_exists()?;
    first.set_contents("Hello").create()?;

    // missing parent directories are created on save
    let mut second = File::new(format!("{root}/notes/second.txt"), PathOptions::empty())?;
    second.set_contents("World").save()?;
    second.append_line("!")?;

    // scans the whole tree, keeping only text files
    let mut dir = Dir::new(root, PathOptions::DIR_READ_RECURSIVELY)?;
    for uri in dir.read(Some("*.txt"))? {
        println!("found {uri}");
    }

    // rescan without a mask and print modification times of the files
    dir.read(None)?;
    println!("{} file(s), {} dir(s)", dir.count_files(None)?, dir.count_dirs(None)?);
    for element in dir.add_files_mtimes()? {
        if let Some(mtime) = element.mtime_formatted() {
            println!("{} modified at {}", element.uri(), mtime);
        }
    }

    println!("{}, {}", first.read()?, second.read()?);

    // removes both files and then every directory left empty below the temp dir
    first.delete()?;
    second.delete()?;
    let depth = Path::new(tmp, PathOptions::empty())?
        .segments()
        .len();
    docs.delete_empty_dirs(depth)?;
    Path::new(format!("{root}/notes/"), PathOptions::empty())?.delete_empty_dirs(depth)?;

    Ok(())
}
