use clap::{Arg, ArgMatches};
use tableau_metadata::gen::schema::{self, TypeKind, TYPES};

pub struct TypesCommand;

impl TypesCommand {
    pub fn new_cmd() -> clap::Command {
        clap::Command::new("types")
            .about("Describe the schema types known to this client")
            .arg(Arg::new("name").help("Type to describe; lists every type when omitted"))
    }

    pub fn exec(arg_matches: &ArgMatches) -> eyre::Result<()> {
        let Some(name) = arg_matches.get_one::<String>("name") else {
            for ty in TYPES {
                println!("{:<28} {}", ty.name, kind(ty.kind));
            }
            return Ok(());
        };

        print!("{}", describe(name)?);

        Ok(())
    }
}

fn kind(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Object => "object",
        TypeKind::Interface => "interface",
    }
}

fn describe(name: &str) -> eyre::Result<String> {
    let ty = schema::lookup(name).ok_or_else(|| eyre::eyre!("unknown type {name}"))?;

    let mut out = format!("{} {}\n", kind(ty.kind), ty.name);
    if !ty.description.is_empty() {
        out.push_str(&format!("  {}\n", ty.description));
    }
    if !ty.interfaces.is_empty() {
        out.push_str(&format!("  implements {}\n", ty.interfaces.join(", ")));
    }
    if ty.kind == TypeKind::Interface {
        let possible = ty
            .possible_types()
            .iter()
            .map(|t| t.name)
            .collect::<Vec<_>>();
        out.push_str(&format!("  possible types {}\n", possible.join(", ")));
    }

    out.push('\n');
    for field in ty.all_fields() {
        out.push_str(&format!("  {}: {}\n", field.name, field.type_ref));
        if !field.description.is_empty() {
            out.push_str(&format!("      {}\n", field.description));
        }
    }

    Ok(out)
}
