//! Element schemas for pivot table parts (`xl/pivotTables/pivotTableN.xml`).
//!
//! Attribute lists follow the order Excel writes them in, which is also the order the encoder
//! emits. Defaults are the lexical XSD defaults from ECMA-376 Part 1, §18.10.

use crate::openxml::{NS_MAIN, NS_RELATIONSHIPS, NS_SHARED_TYPES, NS_SPREADSHEET_DRAWING};
use crate::scalar::ScalarType;
use crate::schema::{AttributeSpec, ChildSpec, Content, ElementSchema, QualifiedName};

pub const ST_AXIS: ScalarType =
    ScalarType::Enum(&["axisRow", "axisCol", "axisPage", "axisValues"]);

pub const ST_ITEM_TYPE: ScalarType = ScalarType::Enum(&[
    "data", "default", "sum", "countA", "avg", "max", "min", "product", "count", "stdDev",
    "stdDevP", "var", "varP", "grand", "blank",
]);

pub const ST_FIELD_SORT_TYPE: ScalarType =
    ScalarType::Enum(&["manual", "ascending", "descending"]);

pub const ST_DATA_CONSOLIDATE_FUNCTION: ScalarType = ScalarType::Enum(&[
    "average", "count", "countNums", "max", "min", "product", "stdDev", "stdDevp", "sum", "var",
    "varp",
]);

pub const ST_SHOW_DATA_AS: ScalarType = ScalarType::Enum(&[
    "normal",
    "difference",
    "percent",
    "percentDiff",
    "runTotal",
    "percentOfRow",
    "percentOfCol",
    "percentOfTotal",
    "index",
]);

pub const ST_FORMAT_ACTION: ScalarType =
    ScalarType::Enum(&["blank", "formatting", "drill", "formula"]);

pub const ST_SCOPE: ScalarType = ScalarType::Enum(&["selection", "data", "field"]);

pub const ST_TYPE: ScalarType = ScalarType::Enum(&["none", "all", "row", "column"]);

pub const ST_PIVOT_AREA_TYPE: ScalarType = ScalarType::Enum(&[
    "none", "normal", "data", "all", "origin", "button", "topEnd", "topRight",
]);

pub const ST_PIVOT_FILTER_TYPE: ScalarType = ScalarType::Enum(&[
    "unknown",
    "count",
    "percent",
    "sum",
    "captionEqual",
    "captionNotEqual",
    "captionBeginsWith",
    "captionNotBeginsWith",
    "captionEndsWith",
    "captionNotEndsWith",
    "captionContains",
    "captionNotContains",
    "captionGreaterThan",
    "captionGreaterThanOrEqual",
    "captionLessThan",
    "captionLessThanOrEqual",
    "captionBetween",
    "captionNotBetween",
    "valueEqual",
    "valueNotEqual",
    "valueGreaterThan",
    "valueGreaterThanOrEqual",
    "valueLessThan",
    "valueLessThanOrEqual",
    "valueBetween",
    "valueNotBetween",
    "dateEqual",
    "dateNotEqual",
    "dateOlderThan",
    "dateOlderThanOrEqual",
    "dateNewerThan",
    "dateNewerThanOrEqual",
    "dateBetween",
    "dateNotBetween",
    "tomorrow",
    "today",
    "yesterday",
    "nextWeek",
    "thisWeek",
    "lastWeek",
    "nextMonth",
    "thisMonth",
    "lastMonth",
    "nextQuarter",
    "thisQuarter",
    "lastQuarter",
    "nextYear",
    "thisYear",
    "lastYear",
    "yearToDate",
    "Q1",
    "Q2",
    "Q3",
    "Q4",
    "M1",
    "M2",
    "M3",
    "M4",
    "M5",
    "M6",
    "M7",
    "M8",
    "M9",
    "M10",
    "M11",
    "M12",
]);

const fn main(local: &'static str) -> QualifiedName {
    QualifiedName::new(NS_MAIN, local)
}

const fn text(name: &'static str) -> AttributeSpec {
    AttributeSpec::optional(name, ScalarType::String)
}

const fn flag(name: &'static str, default: &'static str) -> AttributeSpec {
    AttributeSpec::optional(name, ScalarType::Bool).with_default(default)
}

const fn uint(name: &'static str) -> AttributeSpec {
    AttributeSpec::optional(name, ScalarType::U32)
}

const fn int(name: &'static str) -> AttributeSpec {
    AttributeSpec::optional(name, ScalarType::I32)
}

const fn count() -> AttributeSpec {
    uint("count")
}

pub static PIVOT_TABLE_DEFINITION: ElementSchema = ElementSchema {
    type_name: "CT_pivotTableDefinition",
    name: main("pivotTableDefinition"),
    attributes: &[
        AttributeSpec::required("name", ScalarType::String),
        AttributeSpec::required("cacheId", ScalarType::U32),
        flag("dataOnRows", "0"),
        uint("dataPosition"),
        uint("autoFormatId"),
        AttributeSpec::optional("applyNumberFormats", ScalarType::Bool),
        AttributeSpec::optional("applyBorderFormats", ScalarType::Bool),
        AttributeSpec::optional("applyFontFormats", ScalarType::Bool),
        AttributeSpec::optional("applyPatternFormats", ScalarType::Bool),
        AttributeSpec::optional("applyAlignmentFormats", ScalarType::Bool),
        AttributeSpec::optional("applyWidthHeightFormats", ScalarType::Bool),
        AttributeSpec::required("dataCaption", ScalarType::String),
        text("grandTotalCaption"),
        text("errorCaption"),
        flag("showError", "0"),
        text("missingCaption"),
        flag("showMissing", "1"),
        text("pageStyle"),
        text("pivotTableStyle"),
        text("vacatedStyle"),
        text("tag"),
        AttributeSpec::optional("updatedVersion", ScalarType::U8).with_default("0"),
        AttributeSpec::optional("minRefreshableVersion", ScalarType::U8).with_default("0"),
        flag("asteriskTotals", "0"),
        flag("showItems", "1"),
        flag("editData", "0"),
        flag("disableFieldList", "0"),
        flag("showCalcMbrs", "1"),
        flag("visualTotals", "1"),
        flag("showMultipleLabel", "1"),
        flag("showDataDropDown", "1"),
        flag("showDrill", "1"),
        flag("printDrill", "0"),
        flag("showMemberPropertyTips", "1"),
        flag("showDataTips", "1"),
        flag("enableWizard", "1"),
        flag("enableDrill", "1"),
        flag("enableFieldProperties", "1"),
        flag("preserveFormatting", "1"),
        flag("useAutoFormatting", "0"),
        uint("pageWrap").with_default("0"),
        flag("pageOverThenDown", "0"),
        flag("subtotalHiddenItems", "0"),
        flag("rowGrandTotals", "1"),
        flag("colGrandTotals", "1"),
        flag("fieldPrintTitles", "0"),
        flag("itemPrintTitles", "0"),
        flag("mergeItem", "0"),
        flag("showDropZones", "1"),
        AttributeSpec::optional("createdVersion", ScalarType::U8).with_default("0"),
        uint("indent").with_default("1"),
        flag("showEmptyRow", "0"),
        flag("showEmptyCol", "0"),
        flag("showHeaders", "1"),
        flag("compact", "1"),
        flag("outline", "0"),
        flag("outlineData", "0"),
        flag("compactData", "1"),
        flag("published", "0"),
        flag("gridDropZones", "0"),
        flag("immersive", "1"),
        flag("multipleFieldFilters", "1"),
        uint("chartFormat").with_default("0"),
        text("rowHeaderCaption"),
        text("colHeaderCaption"),
        flag("fieldListSortAscending", "0"),
        flag("mdxSubqueries", "0"),
        flag("customListSort", "1"),
    ],
    children: &[
        ChildSpec::required(main("location"), &LOCATION),
        ChildSpec::optional(main("pivotFields"), &PIVOT_FIELDS),
        ChildSpec::optional(main("rowFields"), &ROW_FIELDS),
        ChildSpec::optional(main("rowItems"), &ROW_ITEMS),
        ChildSpec::optional(main("colFields"), &COL_FIELDS),
        ChildSpec::optional(main("colItems"), &COL_ITEMS),
        ChildSpec::optional(main("pageFields"), &PAGE_FIELDS),
        ChildSpec::optional(main("dataFields"), &DATA_FIELDS),
        ChildSpec::optional(main("formats"), &FORMATS),
        ChildSpec::optional(main("conditionalFormats"), &CONDITIONAL_FORMATS),
        ChildSpec::optional(main("chartFormats"), &CHART_FORMATS),
        ChildSpec::optional(main("pivotHierarchies"), &PIVOT_HIERARCHIES),
        ChildSpec::optional(main("pivotTableStyleInfo"), &PIVOT_TABLE_STYLE),
        ChildSpec::optional(main("filters"), &PIVOT_FILTERS),
        ChildSpec::optional(main("rowHierarchiesUsage"), &ROW_HIERARCHIES_USAGE),
        ChildSpec::optional(main("colHierarchiesUsage"), &COL_HIERARCHIES_USAGE),
        ChildSpec::optional(main("extLst"), &EXTENSION_LIST),
    ],
    content: Content::Elements,
    namespaces: &[
        ("", NS_MAIN),
        ("r", NS_RELATIONSHIPS),
        ("s", NS_SHARED_TYPES),
        ("xdr", NS_SPREADSHEET_DRAWING),
    ],
};

pub static LOCATION: ElementSchema = ElementSchema {
    type_name: "CT_Location",
    name: main("location"),
    attributes: &[
        AttributeSpec::required("ref", ScalarType::String),
        AttributeSpec::required("firstHeaderRow", ScalarType::U32),
        AttributeSpec::required("firstDataRow", ScalarType::U32),
        AttributeSpec::required("firstDataCol", ScalarType::U32),
        uint("rowPageCount").with_default("0"),
        uint("colPageCount").with_default("0"),
    ],
    children: &[],
    content: Content::Elements,
    namespaces: &[],
};

pub static PIVOT_FIELDS: ElementSchema = ElementSchema {
    type_name: "CT_PivotFields",
    name: main("pivotFields"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("pivotField"), &PIVOT_FIELD, 1)],
    content: Content::Elements,
    namespaces: &[],
};

pub static PIVOT_FIELD: ElementSchema = ElementSchema {
    type_name: "CT_PivotField",
    name: main("pivotField"),
    attributes: &[
        text("name"),
        AttributeSpec::optional("axis", ST_AXIS),
        flag("dataField", "0"),
        text("subtotalCaption"),
        flag("showDropDowns", "1"),
        flag("hiddenLevel", "0"),
        text("uniqueMemberProperty"),
        flag("compact", "1"),
        flag("allDrilled", "0"),
        uint("numFmtId"),
        flag("outline", "1"),
        flag("subtotalTop", "1"),
        flag("dragToRow", "1"),
        flag("dragToCol", "1"),
        flag("multipleItemSelectionAllowed", "0"),
        flag("dragToPage", "1"),
        flag("dragToData", "1"),
        flag("dragOff", "1"),
        flag("showAll", "1"),
        flag("insertBlankRow", "0"),
        flag("serverField", "0"),
        flag("insertPageBreak", "0"),
        flag("autoShow", "0"),
        flag("topAutoShow", "1"),
        flag("hideNewItems", "0"),
        flag("measureFilter", "0"),
        flag("includeNewItemsInFilter", "0"),
        uint("itemPageCount").with_default("10"),
        AttributeSpec::optional("sortType", ST_FIELD_SORT_TYPE).with_default("manual"),
        AttributeSpec::optional("dataSourceSort", ScalarType::Bool),
        flag("nonAutoSortDefault", "0"),
        uint("rankBy"),
        flag("defaultSubtotal", "1"),
        flag("sumSubtotal", "0"),
        flag("countASubtotal", "0"),
        flag("avgSubtotal", "0"),
        flag("maxSubtotal", "0"),
        flag("minSubtotal", "0"),
        flag("productSubtotal", "0"),
        flag("countSubtotal", "0"),
        flag("stdDevSubtotal", "0"),
        flag("stdDevPSubtotal", "0"),
        flag("varSubtotal", "0"),
        flag("varPSubtotal", "0"),
        flag("showPropCell", "0"),
        flag("showPropTip", "0"),
        flag("showPropAsCaption", "0"),
        flag("defaultAttributeDrillState", "0"),
    ],
    children: &[
        ChildSpec::optional(main("items"), &ITEMS),
        ChildSpec::optional(main("autoSortScope"), &AUTO_SORT_SCOPE),
        ChildSpec::optional(main("extLst"), &EXTENSION_LIST),
    ],
    content: Content::Elements,
    namespaces: &[],
};

pub static ITEMS: ElementSchema = ElementSchema {
    type_name: "CT_Items",
    name: main("items"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("item"), &ITEM, 1)],
    content: Content::Elements,
    namespaces: &[],
};

pub static ITEM: ElementSchema = ElementSchema {
    type_name: "CT_Item",
    name: main("item"),
    attributes: &[
        text("n"),
        AttributeSpec::optional("t", ST_ITEM_TYPE).with_default("data"),
        flag("h", "0"),
        flag("s", "0"),
        flag("sd", "1"),
        flag("f", "0"),
        flag("m", "0"),
        flag("c", "0"),
        uint("x"),
        flag("d", "0"),
        flag("e", "1"),
    ],
    children: &[],
    content: Content::Elements,
    namespaces: &[],
};

pub static AUTO_SORT_SCOPE: ElementSchema = ElementSchema {
    type_name: "CT_AutoSortScope",
    name: main("autoSortScope"),
    attributes: &[],
    children: &[ChildSpec::required(main("pivotArea"), &PIVOT_AREA)],
    content: Content::Elements,
    namespaces: &[],
};

pub static PIVOT_AREA: ElementSchema = ElementSchema {
    type_name: "CT_PivotArea",
    name: main("pivotArea"),
    attributes: &[
        int("field"),
        AttributeSpec::optional("type", ST_PIVOT_AREA_TYPE).with_default("normal"),
        flag("dataOnly", "1"),
        flag("labelOnly", "0"),
        flag("grandRow", "0"),
        flag("grandCol", "0"),
        flag("cacheIndex", "0"),
        flag("outline", "1"),
        text("offset"),
        flag("collapsedLevelsAreSubtotals", "0"),
        AttributeSpec::optional("axis", ST_AXIS),
        uint("fieldPosition"),
    ],
    children: &[
        ChildSpec::optional(main("references"), &PIVOT_AREA_REFERENCES),
        ChildSpec::optional(main("extLst"), &EXTENSION_LIST),
    ],
    content: Content::Elements,
    namespaces: &[],
};

pub static PIVOT_AREA_REFERENCES: ElementSchema = ElementSchema {
    type_name: "CT_PivotAreaReferences",
    name: main("references"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("reference"), &PIVOT_AREA_REFERENCE, 1)],
    content: Content::Elements,
    namespaces: &[],
};

pub static PIVOT_AREA_REFERENCE: ElementSchema = ElementSchema {
    type_name: "CT_PivotAreaReference",
    name: main("reference"),
    attributes: &[
        uint("field"),
        count(),
        flag("selected", "1"),
        flag("byPosition", "0"),
        flag("relative", "0"),
        flag("defaultSubtotal", "0"),
        flag("sumSubtotal", "0"),
        flag("countASubtotal", "0"),
        flag("avgSubtotal", "0"),
        flag("maxSubtotal", "0"),
        flag("minSubtotal", "0"),
        flag("productSubtotal", "0"),
        flag("countSubtotal", "0"),
        flag("stdDevSubtotal", "0"),
        flag("stdDevPSubtotal", "0"),
        flag("varSubtotal", "0"),
        flag("varPSubtotal", "0"),
    ],
    children: &[
        ChildSpec::repeated(main("x"), &INDEX, 0),
        ChildSpec::optional(main("extLst"), &EXTENSION_LIST),
    ],
    content: Content::Elements,
    namespaces: &[],
};

pub static INDEX: ElementSchema = ElementSchema {
    type_name: "CT_Index",
    name: main("x"),
    attributes: &[AttributeSpec::required("v", ScalarType::U32)],
    children: &[],
    content: Content::Elements,
    namespaces: &[],
};

pub static ROW_FIELDS: ElementSchema = ElementSchema {
    type_name: "CT_RowFields",
    name: main("rowFields"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("field"), &FIELD, 1)],
    content: Content::Elements,
    namespaces: &[],
};

pub static COL_FIELDS: ElementSchema = ElementSchema {
    type_name: "CT_ColFields",
    name: main("colFields"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("field"), &FIELD, 1)],
    content: Content::Elements,
    namespaces: &[],
};

/// `<field x="..."/>`; `-2` refers to the data (values) field.
pub static FIELD: ElementSchema = ElementSchema {
    type_name: "CT_Field",
    name: main("field"),
    attributes: &[AttributeSpec::required("x", ScalarType::I32)],
    children: &[],
    content: Content::Elements,
    namespaces: &[],
};

pub static ROW_ITEMS: ElementSchema = ElementSchema {
    type_name: "CT_rowItems",
    name: main("rowItems"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("i"), &LINE_ITEM, 1)],
    content: Content::Elements,
    namespaces: &[],
};

pub static COL_ITEMS: ElementSchema = ElementSchema {
    type_name: "CT_colItems",
    name: main("colItems"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("i"), &LINE_ITEM, 1)],
    content: Content::Elements,
    namespaces: &[],
};

/// One row or column line (`<i>`) of the rendered pivot table.
pub static LINE_ITEM: ElementSchema = ElementSchema {
    type_name: "CT_I",
    name: main("i"),
    attributes: &[
        AttributeSpec::optional("t", ST_ITEM_TYPE).with_default("data"),
        uint("r").with_default("0"),
        uint("i").with_default("0"),
    ],
    children: &[ChildSpec::repeated(main("x"), &MEMBER_INDEX, 0)],
    content: Content::Elements,
    namespaces: &[],
};

pub static MEMBER_INDEX: ElementSchema = ElementSchema {
    type_name: "CT_X",
    name: main("x"),
    attributes: &[int("v").with_default("0")],
    children: &[],
    content: Content::Elements,
    namespaces: &[],
};

pub static PAGE_FIELDS: ElementSchema = ElementSchema {
    type_name: "CT_PageFields",
    name: main("pageFields"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("pageField"), &PAGE_FIELD, 1)],
    content: Content::Elements,
    namespaces: &[],
};

pub static PAGE_FIELD: ElementSchema = ElementSchema {
    type_name: "CT_PageField",
    name: main("pageField"),
    attributes: &[
        AttributeSpec::required("fld", ScalarType::I32),
        uint("item"),
        int("hier"),
        text("name"),
        text("cap"),
    ],
    children: &[ChildSpec::optional(main("extLst"), &EXTENSION_LIST)],
    content: Content::Elements,
    namespaces: &[],
};

pub static DATA_FIELDS: ElementSchema = ElementSchema {
    type_name: "CT_DataFields",
    name: main("dataFields"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("dataField"), &DATA_FIELD, 1)],
    content: Content::Elements,
    namespaces: &[],
};

pub static DATA_FIELD: ElementSchema = ElementSchema {
    type_name: "CT_DataField",
    name: main("dataField"),
    attributes: &[
        text("name"),
        AttributeSpec::required("fld", ScalarType::U32),
        AttributeSpec::optional("subtotal", ST_DATA_CONSOLIDATE_FUNCTION).with_default("sum"),
        AttributeSpec::optional("showDataAs", ST_SHOW_DATA_AS).with_default("normal"),
        int("baseField").with_default("-1"),
        uint("baseItem").with_default("1048832"),
        uint("numFmtId"),
    ],
    children: &[ChildSpec::optional(main("extLst"), &EXTENSION_LIST)],
    content: Content::Elements,
    namespaces: &[],
};

pub static FORMATS: ElementSchema = ElementSchema {
    type_name: "CT_Formats",
    name: main("formats"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("format"), &FORMAT, 1)],
    content: Content::Elements,
    namespaces: &[],
};

pub static FORMAT: ElementSchema = ElementSchema {
    type_name: "CT_Format",
    name: main("format"),
    attributes: &[
        AttributeSpec::optional("action", ST_FORMAT_ACTION).with_default("formatting"),
        uint("dxfId"),
    ],
    children: &[
        ChildSpec::required(main("pivotArea"), &PIVOT_AREA),
        ChildSpec::optional(main("extLst"), &EXTENSION_LIST),
    ],
    content: Content::Elements,
    namespaces: &[],
};

pub static CONDITIONAL_FORMATS: ElementSchema = ElementSchema {
    type_name: "CT_ConditionalFormats",
    name: main("conditionalFormats"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("conditionalFormat"), &CONDITIONAL_FORMAT, 1)],
    content: Content::Elements,
    namespaces: &[],
};

pub static CONDITIONAL_FORMAT: ElementSchema = ElementSchema {
    type_name: "CT_ConditionalFormat",
    name: main("conditionalFormat"),
    attributes: &[
        AttributeSpec::optional("scope", ST_SCOPE).with_default("selection"),
        AttributeSpec::optional("type", ST_TYPE).with_default("none"),
        AttributeSpec::required("priority", ScalarType::U32),
    ],
    children: &[
        ChildSpec::required(main("pivotAreas"), &PIVOT_AREAS),
        ChildSpec::optional(main("extLst"), &EXTENSION_LIST),
    ],
    content: Content::Elements,
    namespaces: &[],
};

pub static PIVOT_AREAS: ElementSchema = ElementSchema {
    type_name: "CT_PivotAreas",
    name: main("pivotAreas"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("pivotArea"), &PIVOT_AREA, 0)],
    content: Content::Elements,
    namespaces: &[],
};

pub static CHART_FORMATS: ElementSchema = ElementSchema {
    type_name: "CT_ChartFormats",
    name: main("chartFormats"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("chartFormat"), &CHART_FORMAT, 1)],
    content: Content::Elements,
    namespaces: &[],
};

pub static CHART_FORMAT: ElementSchema = ElementSchema {
    type_name: "CT_ChartFormat",
    name: main("chartFormat"),
    attributes: &[
        AttributeSpec::required("chart", ScalarType::U32),
        AttributeSpec::required("format", ScalarType::U32),
        flag("series", "0"),
    ],
    children: &[ChildSpec::required(main("pivotArea"), &PIVOT_AREA)],
    content: Content::Elements,
    namespaces: &[],
};

pub static PIVOT_HIERARCHIES: ElementSchema = ElementSchema {
    type_name: "CT_PivotHierarchies",
    name: main("pivotHierarchies"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("pivotHierarchy"), &PIVOT_HIERARCHY, 1)],
    content: Content::Elements,
    namespaces: &[],
};

/// OLAP hierarchy settings. Member property lists (`mps`, `members`) are not modelled and are
/// skipped on decode.
pub static PIVOT_HIERARCHY: ElementSchema = ElementSchema {
    type_name: "CT_PivotHierarchy",
    name: main("pivotHierarchy"),
    attributes: &[
        flag("outline", "0"),
        flag("multipleItemSelectionAllowed", "0"),
        flag("subtotalTop", "0"),
        flag("showInFieldList", "1"),
        flag("dragToRow", "1"),
        flag("dragToCol", "1"),
        flag("dragToPage", "1"),
        flag("dragToData", "0"),
        flag("dragOff", "1"),
        flag("includeNewItemsInFilter", "0"),
        text("caption"),
    ],
    children: &[ChildSpec::optional(main("extLst"), &EXTENSION_LIST)],
    content: Content::Elements,
    namespaces: &[],
};

pub static PIVOT_TABLE_STYLE: ElementSchema = ElementSchema {
    type_name: "CT_PivotTableStyle",
    name: main("pivotTableStyleInfo"),
    attributes: &[
        text("name"),
        AttributeSpec::optional("showRowHeaders", ScalarType::Bool),
        AttributeSpec::optional("showColHeaders", ScalarType::Bool),
        AttributeSpec::optional("showRowStripes", ScalarType::Bool),
        AttributeSpec::optional("showColStripes", ScalarType::Bool),
        AttributeSpec::optional("showLastColumn", ScalarType::Bool),
    ],
    children: &[],
    content: Content::Elements,
    namespaces: &[],
};

pub static PIVOT_FILTERS: ElementSchema = ElementSchema {
    type_name: "CT_PivotFilters",
    name: main("filters"),
    attributes: &[uint("count").with_default("0")],
    children: &[ChildSpec::repeated(main("filter"), &PIVOT_FILTER, 0)],
    content: Content::Elements,
    namespaces: &[],
};

pub static PIVOT_FILTER: ElementSchema = ElementSchema {
    type_name: "CT_PivotFilter",
    name: main("filter"),
    attributes: &[
        AttributeSpec::required("fld", ScalarType::U32),
        uint("mpFld"),
        AttributeSpec::required("type", ST_PIVOT_FILTER_TYPE),
        int("evalOrder").with_default("0"),
        AttributeSpec::required("id", ScalarType::U32),
        uint("iMeasureHier"),
        uint("iMeasureFld"),
        text("name"),
        text("description"),
        text("stringValue1"),
        text("stringValue2"),
    ],
    children: &[
        ChildSpec::required(main("autoFilter"), &AUTO_FILTER),
        ChildSpec::optional(main("extLst"), &EXTENSION_LIST),
    ],
    content: Content::Elements,
    namespaces: &[],
};

/// Filter criteria (`filterColumn`, `sortState`, ...) are shared with worksheet autofilters and
/// kept as verbatim inner XML.
pub static AUTO_FILTER: ElementSchema = ElementSchema {
    type_name: "CT_AutoFilter",
    name: main("autoFilter"),
    attributes: &[text("ref")],
    children: &[],
    content: Content::Raw,
    namespaces: &[],
};

pub static ROW_HIERARCHIES_USAGE: ElementSchema = ElementSchema {
    type_name: "CT_RowHierarchiesUsage",
    name: main("rowHierarchiesUsage"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("rowHierarchyUsage"), &HIERARCHY_USAGE, 1)],
    content: Content::Elements,
    namespaces: &[],
};

pub static COL_HIERARCHIES_USAGE: ElementSchema = ElementSchema {
    type_name: "CT_ColHierarchiesUsage",
    name: main("colHierarchiesUsage"),
    attributes: &[count()],
    children: &[ChildSpec::repeated(main("colHierarchyUsage"), &HIERARCHY_USAGE, 1)],
    content: Content::Elements,
    namespaces: &[],
};

pub static HIERARCHY_USAGE: ElementSchema = ElementSchema {
    type_name: "CT_HierarchyUsage",
    name: main("rowHierarchyUsage"),
    attributes: &[AttributeSpec::required("hierarchyUsage", ScalarType::I32)],
    children: &[],
    content: Content::Elements,
    namespaces: &[],
};

pub static EXTENSION_LIST: ElementSchema = ElementSchema {
    type_name: "CT_ExtensionList",
    name: main("extLst"),
    attributes: &[],
    children: &[ChildSpec::repeated(main("ext"), &EXTENSION, 0)],
    content: Content::Elements,
    namespaces: &[],
};

pub static EXTENSION: ElementSchema = ElementSchema {
    type_name: "CT_Extension",
    name: main("ext"),
    attributes: &[text("uri")],
    children: &[],
    content: Content::Raw,
    namespaces: &[],
};
