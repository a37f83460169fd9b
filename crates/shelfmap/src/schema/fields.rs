//! Field names of the SharedShelf cataloging template.
//!
//! Names are used verbatim: the bracketed number is the field's stable id in
//! the target system.

pub const SSID: &str = "SSID";
pub const FILENAME: &str = "Filename";
pub const FILE_COUNT: &str = "File Count";

pub const CREATOR: &str = "Creator[34336]";
pub const CULTURE: &str = "Culture[34337]";
pub const TITLE: &str = "Title[34338]";
pub const DATE_DESCRIPTION: &str = "Date Description[34341]";
pub const ARTSTOR_EARLIEST_DATE: &str = "ARTstor Earliest Date[34342]";
pub const ARTSTOR_LATEST_DATE: &str = "ARTstor Latest Date[34343]";
pub const MATERIALS_TECHNIQUES: &str = "Materials/Techniques[34345]";
pub const WORK_TYPE: &str = "Work Type[34348]";
pub const REPOSITORY: &str = "Repository[34349]";
pub const ARTSTOR_COUNTRY: &str = "Artstor Country[34356]";
pub const DESCRIPTION: &str = "Description[34357]";
pub const RIGHTS: &str = "Rights[34363]";
pub const REPOSITORY_CLASSIFICATION_NUMBER: &str = "Repository Classification Number[34364]";
pub const IMAGE_REPOSITORY: &str = "Image Repository[34365]";
pub const IMAGE_CLASSIFICATION_NUMBER: &str = "Image Classification Number[34369]";
pub const SEND_TO_HARVARD: &str = "Send To Harvard[34382]";
pub const IN_HOUSE_USE_ONLY: &str = "In House Use Only[34383]";
pub const EXPORT_ONLY_IN_GROUP: &str = "Export Only In Group[34411]";
pub const NOTES: &str = "Notes[2560400]";
pub const RIGHTS_ACCESS_INFORMATION: &str = "Rights/Access Information[2560402]";
pub const MATERIALS_TECHNIQUES_NOTE: &str = "Materials Techniques Note[2560408]";
pub const REPOSITORY_NUMBER: &str = "Repository Number[2560412]";
pub const EARLIEST_DATE: &str = "Earliest Date[2560433]";
pub const LATEST_DATE: &str = "Latest Date[2560435]";

/// Fields whose absence disables their category for the whole run.
pub const REQUIRED: &[&str] = &[DESCRIPTION, CULTURE, ARTSTOR_COUNTRY];

/// Default template layout, in column order.
pub const SHARED_SHELF: &[&str] = &[
    SSID,
    FILENAME,
    FILE_COUNT,
    CREATOR,
    TITLE,
    CULTURE,
    DATE_DESCRIPTION,
    ARTSTOR_EARLIEST_DATE,
    ARTSTOR_LATEST_DATE,
    EARLIEST_DATE,
    LATEST_DATE,
    MATERIALS_TECHNIQUES,
    MATERIALS_TECHNIQUES_NOTE,
    WORK_TYPE,
    REPOSITORY,
    REPOSITORY_CLASSIFICATION_NUMBER,
    REPOSITORY_NUMBER,
    ARTSTOR_COUNTRY,
    DESCRIPTION,
    RIGHTS,
    RIGHTS_ACCESS_INFORMATION,
    NOTES,
    IMAGE_REPOSITORY,
    IMAGE_CLASSIFICATION_NUMBER,
    SEND_TO_HARVARD,
    IN_HOUSE_USE_ONLY,
    EXPORT_ONLY_IN_GROUP,
];
