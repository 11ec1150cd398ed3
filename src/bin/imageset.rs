use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use imageset::{
    AnnotationPipeline, ArrowSpec, AssetId, AssetStore, Collection, CropRegion, decode_rgba,
    encode_png,
};

#[derive(Parser, Debug)]
#[command(name = "imageset", version)]
struct Cli {
    /// Storage root holding the collection directories.
    #[arg(long, default_value = "storage")]
    root: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List assets, with caption markers for dataset entries.
    List(ListArgs),
    /// Copy an asset's bytes out of the store.
    Show(ShowArgs),
    /// Store an image file as a new original.
    Ingest(IngestArgs),
    /// Crop a region of an asset into a new dataset entry.
    Crop(CropArgs),
    /// Attach caption text to a dataset asset.
    Tag(TagArgs),
    /// Draw a directional arrow over an asset.
    Arrow(ArrowArgs),
    /// Delete assets, best-effort.
    Delete(DeleteArgs),
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Restrict the listing to one collection.
    #[arg(long)]
    collection: Option<Collection>,
}

#[derive(Parser, Debug)]
struct ShowArgs {
    /// Logical identifier (`collection/filename`).
    id: String,

    /// Output file path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct IngestArgs {
    /// Image file to store.
    file: PathBuf,
}

#[derive(Parser, Debug)]
struct CropArgs {
    /// Source logical identifier.
    id: String,

    /// Left edge of the crop rectangle.
    #[arg(long)]
    x: u32,

    /// Top edge of the crop rectangle.
    #[arg(long)]
    y: u32,

    /// Crop width in pixels.
    #[arg(long)]
    width: u32,

    /// Crop height in pixels.
    #[arg(long)]
    height: u32,
}

#[derive(Parser, Debug)]
struct TagArgs {
    /// Target logical identifier.
    id: String,

    /// Caption text.
    text: String,
}

#[derive(Parser, Debug)]
struct ArrowArgs {
    /// Source logical identifier.
    id: String,

    /// Shaft start x.
    #[arg(long, allow_negative_numbers = true)]
    start_x: i32,

    /// Shaft start y.
    #[arg(long, allow_negative_numbers = true)]
    start_y: i32,

    /// Tip x.
    #[arg(long, allow_negative_numbers = true)]
    end_x: i32,

    /// Tip y.
    #[arg(long, allow_negative_numbers = true)]
    end_y: i32,
}

#[derive(Parser, Debug)]
struct DeleteArgs {
    /// Logical identifiers to delete.
    #[arg(required = true)]
    ids: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let store = AssetStore::new(&cli.root);
    match cli.cmd {
        Command::List(args) => cmd_list(&store, args),
        Command::Show(args) => cmd_show(&store, args),
        Command::Ingest(args) => cmd_ingest(&store, args),
        Command::Crop(args) => cmd_crop(&store, args),
        Command::Tag(args) => cmd_tag(&store, args),
        Command::Arrow(args) => cmd_arrow(&store, args),
        Command::Delete(args) => cmd_delete(&store, args),
    }
}

fn cmd_list(store: &AssetStore, args: ListArgs) -> anyhow::Result<()> {
    let collections: &[Collection] = match &args.collection {
        Some(c) => std::slice::from_ref(c),
        None => &Collection::ALL,
    };

    for &collection in collections {
        for entry in store.list(collection)? {
            if entry.has_caption {
                println!("{collection}/{} [caption]", entry.filename);
            } else {
                println!("{collection}/{}", entry.filename);
            }
        }
    }
    Ok(())
}

fn cmd_show(store: &AssetStore, args: ShowArgs) -> anyhow::Result<()> {
    let id = AssetId::parse(&args.id)?;
    let bytes = store.read(&id)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("write '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_ingest(store: &AssetStore, args: IngestArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("read '{}'", args.file.display()))?;
    let img = decode_rgba(&bytes)?;

    let id = AssetId::fresh(Collection::Originals);
    store.write(&id, &encode_png(&img)?)?;

    eprintln!("stored {id}");
    Ok(())
}

fn cmd_crop(store: &AssetStore, args: CropArgs) -> anyhow::Result<()> {
    let pipeline = AnnotationPipeline::new(store.clone());
    let source = AssetId::parse(&args.id)?;
    let derived = pipeline.crop(
        &source,
        CropRegion {
            x: args.x,
            y: args.y,
            width: args.width,
            height: args.height,
        },
    )?;

    eprintln!("wrote {derived}");
    Ok(())
}

fn cmd_tag(store: &AssetStore, args: TagArgs) -> anyhow::Result<()> {
    let pipeline = AnnotationPipeline::new(store.clone());
    let target = AssetId::parse(&args.id)?;
    let caption = pipeline.tag(&target, &args.text)?;

    eprintln!("wrote {caption}");
    Ok(())
}

fn cmd_arrow(store: &AssetStore, args: ArrowArgs) -> anyhow::Result<()> {
    let pipeline = AnnotationPipeline::new(store.clone());
    let source = AssetId::parse(&args.id)?;
    let target = pipeline.arrow_overlay(
        &source,
        ArrowSpec {
            start_x: args.start_x,
            start_y: args.start_y,
            end_x: args.end_x,
            end_y: args.end_y,
        },
    )?;

    eprintln!("wrote {target}");
    Ok(())
}

fn cmd_delete(store: &AssetStore, args: DeleteArgs) -> anyhow::Result<()> {
    let pipeline = AnnotationPipeline::new(store.clone());
    let report = pipeline.delete_batch(&args.ids);

    for id in &report.deleted {
        println!("deleted {id}");
    }
    for id in &report.failed {
        println!("failed {id}");
    }
    Ok(())
}
