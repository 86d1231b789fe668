//! GeoTIFF 键目录管理模块
//!
//! 本模块实现了 GeoTIFF 规范中的 GeoKeyDirectory 结构的序列化。
//!
//! # 参考标准
//!
//! - [GeoKeyDirectoryTag 规范](https://docs.ogc.org/is/19-008r4/19-008r4.html#_requirements_class_geokeydirectorytag)
//! - [GeoKey 数据类型](https://docs.ogc.org/is/19-008r4/19-008r4.html#_requirements_class_geokeydatatypes)

use std::fmt::Display;

use super::{GeoKeyId, GeoKeyValue, GeoTiffTag};

/// GeoTIFF 键目录结构
///
/// * `version` - 键目录版本号
/// * `revision` - 修订版本号,格式为 (主版本号, 次版本号)
/// * `keys` - 存储的 GeoKey 列表
#[derive(Clone, Debug, PartialEq)]
pub struct GeoKeyDirectory {
    pub version: u16,
    pub revision: (u16, u16),
    pub keys: Vec<GeoKey>,
}

/// GeoTIFF 键值对
#[derive(Clone, Debug, PartialEq)]
pub struct GeoKey {
    pub code: u16,
    pub value: GeoKeyValue,
}

impl GeoKey {
    /// 获取键的标准标识符
    ///
    /// 如果代码不是已知的键,返回 None。
    pub fn id(&self) -> Option<GeoKeyId> {
        GeoKeyId::try_from(self.code).ok()
    }
}

/// 序列化后的键目录
///
/// 分别对应 GeoKeyDirectory、GeoAsciiParams、GeoDoubleParams 三个 TIFF 标签。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EncodedDirectory {
    pub directory: Vec<u16>,
    pub ascii_params: String,
    pub double_params: Vec<f64>,
}

impl Default for GeoKeyDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoKeyDirectory {
    /// 创建新的键目录
    ///
    /// 版本号 1,修订版本 1.0,空的键列表
    pub fn new() -> Self {
        Self {
            version: 1,
            revision: (1, 0),
            keys: vec![],
        }
    }

    /// 序列化键目录
    ///
    /// 目录头部之后依次是每个键的 (键ID, 存储位置, 数量, 偏移量)。
    /// 单个短整型值直接存放在偏移量字段中,其余值存放在对应的参数标签里。
    pub fn unparse(&self) -> EncodedDirectory {
        let mut directory = vec![]; // 键目录结构
        let mut shorts = vec![]; // 目录之后的短整型值
        let mut asciis = String::new();
        let mut doubles = vec![];

        // 目录部分的长度(头部4个u16,每个键4个u16)
        let dir_size = 4 * (self.keys.len() + 1) as u16;

        directory.push(self.version);
        directory.push(self.revision.0);
        directory.push(self.revision.1);
        directory.push(self.keys.len() as u16);

        for key in &self.keys {
            directory.push(key.code);

            match &key.value {
                GeoKeyValue::Short(vec) => match vec.len() {
                    0 => directory.extend([0, 0, 0]),
                    // 存储位置为0代表值就在偏移量字段中
                    1 => directory.extend([0, 1, vec[0]]),
                    n => {
                        directory.push(GeoTiffTag::GeoKeyDirectory.into());
                        directory.push(n as u16);
                        directory.push(dir_size + shorts.len() as u16);
                        shorts.extend(vec);
                    }
                },
                GeoKeyValue::Ascii(s) => {
                    // 每个字符串以 '|' 结尾,数量包含该分隔符
                    directory.push(GeoTiffTag::GeoAsciiParams.into());
                    directory.push(s.len() as u16 + 1);
                    directory.push(asciis.len() as u16);
                    asciis.push_str(s);
                    asciis.push('|');
                }
                GeoKeyValue::Double(vec) => {
                    directory.push(GeoTiffTag::GeoDoubleParams.into());
                    directory.push(vec.len() as u16);
                    directory.push(doubles.len() as u16);
                    doubles.extend(vec);
                }
            }
        }

        EncodedDirectory {
            directory: [directory, shorts].concat(),
            ascii_params: asciis,
            double_params: doubles,
        }
    }
}

/// 格式化输出包括标准键的名称或十六进制代码,以及键值
impl Display for GeoKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id_string = match self.id() {
            Some(id) => format!("{id:?}"),
            None => format!("0x{:04X}", self.code),
        };
        write!(f, "{}: {}", id_string, self.value)
    }
}
