use vocab::{Schema, VocabError, VocabResult};

use crate::Context;

pub fn describe(ctx: &Context, type_tag: Option<&str>) -> VocabResult<()> {
	let lines = match type_tag {
		None => type_listing(&ctx.schema),
		Some(tag) => type_details(&ctx.schema, tag)?,
	};
	for line in lines {
		println!("{line}");
	}
	Ok(())
}

fn type_listing(schema: &Schema) -> Vec<String> {
	schema
		.types()
		.map(|t| match &t.extends {
			Some(parent) => format!("{} : {parent}", t.name),
			None => t.name.clone(),
		})
		.collect()
}

fn type_details(schema: &Schema, type_tag: &str) -> VocabResult<Vec<String>> {
	let decl = schema.get(type_tag)
		.ok_or_else(|| VocabError::UnknownType(type_tag.to_string()))?;

	let mut chain = vec![decl.name.as_str()];
	chain.extend(schema.ancestors(type_tag));
	let mut out = vec![chain.join(" > ")];

	for prop in &decl.properties {
		let kinds : Vec<&str> = prop.kinds.iter().map(|k| k.as_ref()).collect();
		out.push(format!("  {:<20} {:<14} {}", prop.name, prop.cardinality.as_ref(), kinds.join(" | ")));
	}

	Ok(out)
}
